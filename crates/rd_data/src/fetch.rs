// crates/rd_data/src/fetch.rs

//! Open-Meteo 日降雨量客户端
//!
//! 请求参数为经纬度与 ISO 日期范围；响应是成对数组（日期序列 +
//! 日降雨量序列），在此被重塑为 [`RainRecord`] 序列。数组缺失或
//! 长度不匹配是取数层错误——统计层假定收到的记录总是良构的。
//!
//! 网络失败以可恢复的 [`DataError::Fetch`] 上报（带人类可读信息），
//! 不会导致模拟崩溃；重试策略留给调用方。

use chrono::{Local, Months, NaiveDate};
use serde::Deserialize;
use tracing::info;

use rd_config::DataConfig;

use crate::error::DataError;
use crate::record::RainRecord;
use crate::store::save_records;

/// Open-Meteo API 端点
const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// 自动获取数据的来源标签
const AUTO_SOURCE: &str = "Open-Meteo (auto)";

/// 取数请求参数
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// 纬度 [度]
    pub latitude: f64,
    /// 经度 [度]
    pub longitude: f64,
    /// 起始日期
    pub start_date: NaiveDate,
    /// 结束日期
    pub end_date: NaiveDate,
}

impl FetchRequest {
    /// 截至指定日期的最近三个月（日期缺省时的默认范围）
    pub fn last_three_months(latitude: f64, longitude: f64, today: NaiveDate) -> Self {
        let start = today.checked_sub_months(Months::new(3)).unwrap_or(today);
        Self {
            latitude,
            longitude,
            start_date: start,
            end_date: today,
        }
    }

    /// 从数据配置构造，缺省日期补全为截至今天的最近三个月
    pub fn from_config(config: &DataConfig) -> Result<Self, DataError> {
        let today = Local::now().date_naive();
        let defaults = Self::last_three_months(config.latitude, config.longitude, today);

        let start_date = match &config.start_date {
            Some(s) => parse_iso_date(s)?,
            None => defaults.start_date,
        };
        let end_date = match &config.end_date {
            Some(s) => parse_iso_date(s)?,
            None => defaults.end_date,
        };

        Ok(Self {
            latitude: config.latitude,
            longitude: config.longitude,
            start_date,
            end_date,
        })
    }

    /// 构造请求 URL
    pub fn build_url(&self) -> String {
        format!(
            "{}?latitude={}&longitude={}&daily=precipitation_sum&timezone=auto&start_date={}&end_date={}",
            OPEN_METEO_URL,
            self.latitude,
            self.longitude,
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d"),
        )
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| DataError::InvalidDate(s.to_string()))
}

/// Open-Meteo 响应（只取需要的字段）
#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: Option<DailyBlock>,
}

/// 成对数组：日期序列 + 日降雨量序列
#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    /// 降雨量可能为 null（观测缺失），按 0 处理
    precipitation_sum: Vec<Option<f64>>,
}

/// 把成对数组重塑为记录序列
///
/// 数组缺失、为空或长度不匹配都是取数层错误。
fn reshape(response: DailyResponse) -> Result<Vec<RainRecord>, DataError> {
    let Some(daily) = response.daily else {
        return Err(DataError::Malformed("响应缺少 daily 数据块".to_string()));
    };

    if daily.time.is_empty() || daily.precipitation_sum.is_empty() {
        return Err(DataError::Malformed("响应不含日数据".to_string()));
    }

    if daily.time.len() != daily.precipitation_sum.len() {
        return Err(DataError::Malformed(format!(
            "数组长度不匹配: 日期 {} 条, 降雨量 {} 条",
            daily.time.len(),
            daily.precipitation_sum.len()
        )));
    }

    Ok(daily
        .time
        .into_iter()
        .zip(daily.precipitation_sum)
        .map(|(date, mm)| RainRecord::with_source(date, mm.unwrap_or(0.0), AUTO_SOURCE))
        .collect())
}

/// 获取日降雨量记录
pub fn fetch(request: &FetchRequest) -> Result<Vec<RainRecord>, DataError> {
    let url = request.build_url();
    info!("获取降雨数据: {}", url);

    let response = ureq::get(&url)
        .call()
        .map_err(|e| DataError::Fetch(format!("Open-Meteo 请求失败: {}", e)))?;

    let parsed: DailyResponse = response
        .into_json()
        .map_err(|e| DataError::Fetch(format!("响应解析失败: {}", e)))?;

    let records = reshape(parsed)?;
    info!("获取到 {} 条记录", records.len());
    Ok(records)
}

/// 获取并原子持久化到本地文件
pub fn fetch_and_store(
    request: &FetchRequest,
    path: &std::path::Path,
) -> Result<Vec<RainRecord>, DataError> {
    let records = fetch(request)?;
    save_records(path, &records)?;
    Ok(records)
}

// crates/rd_data/src/record.rs

//! 降雨记录类型
//!
//! 持久化文件是取数层与统计层之间唯一的交换格式，同时设计为
//! 终端用户可手工编辑（替换为自己的实测数据）。因此字段名是
//! 稳定契约：`date`、`precipitation_mm`、`source`。
//!
//! 日期以 ISO 字符串（YYYY-MM-DD）存储而非结构化类型：外部数据
//! 偶尔畸形，解析推迟到统计层并在那里宽容处理。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单日降雨记录，获取后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainRecord {
    /// 观测日期（ISO，YYYY-MM-DD）
    pub date: String,
    /// 日降雨量 [mm]，非负
    pub precipitation_mm: f64,
    /// 数据来源标签
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RainRecord {
    /// 创建记录
    pub fn new(date: impl Into<String>, precipitation_mm: f64) -> Self {
        Self {
            date: date.into(),
            precipitation_mm,
            source: None,
        }
    }

    /// 创建带来源标签的记录
    pub fn with_source(
        date: impl Into<String>,
        precipitation_mm: f64,
        source: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            precipitation_mm,
            source: Some(source.into()),
        }
    }

    /// 解析日期，失败返回 None（由统计层决定如何处理）
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// 是否为雨天（降雨量严格大于 0；恰好为 0 的日子算干天）
    pub fn is_rainy(&self) -> bool {
        self.precipitation_mm > 0.0
    }
}

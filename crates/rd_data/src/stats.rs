// crates/rd_data/src/stats.rs

//! 降雨统计聚合
//!
//! 纯变换：输入为降雨记录序列（不要求有序、不要求去重），
//! 输出为按 (年, 月) 升序排列的月桶序列加全局汇总。
//!
//! # 算法
//!
//! 1. 按日期的日历月分组；日期无法解析的记录被静默丢弃
//! 2. 月内按日期稳定排序（同日期保持输入相对顺序，影响最大日的并列裁决）
//! 3. 计算总量、雨天/干天数（阈值：降雨量严格 > 0）、日均、最大日
//!    （取到最大值的第一条记录）
//!
//! 对输入顺序幂等：同一无序集合的重复运行总是得到相同的有序桶。

use rd_foundation::float::{safe_div, KahanSum};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::record::RainRecord;

/// 按日历月聚合的降雨桶
#[derive(Debug, Clone, Serialize)]
pub struct MonthBucket {
    /// 年
    pub year: i32,
    /// 月 (1-12)
    pub month: u32,
    /// 该月记录，按日期升序
    pub records: Vec<RainRecord>,
    /// 月降雨总量 [mm]
    pub total: f64,
    /// 日均降雨量 [mm]
    pub avg_per_day: f64,
    /// 雨天数（降雨量 > 0）
    pub rainy_days: usize,
    /// 干天数
    pub dry_days: usize,
    /// 降雨量最大的记录（并列取日期序第一条）
    pub max_day: Option<RainRecord>,
}

impl MonthBucket {
    /// 月份标签，如 "2024-01"
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// 全局降雨汇总
#[derive(Debug, Clone, Serialize)]
pub struct RainSummary {
    /// 月桶，按 (年, 月) 升序
    pub buckets: Vec<MonthBucket>,
    /// 有效记录总数（不含日期畸形的记录）
    pub count: usize,
    /// 降雨总量 [mm]
    pub total: f64,
    /// 平均日降雨量 [mm]
    pub avg: f64,
}

impl RainSummary {
    /// 默认显示的最近三个月切片；不足三个月时返回全部
    pub fn last_three(&self) -> &[MonthBucket] {
        let n = self.buckets.len();
        &self.buckets[n.saturating_sub(3)..]
    }
}

/// 聚合降雨记录
///
/// 日期无法解析的记录被静默丢弃——数据源是外部的、偶尔畸形的，
/// 这是有意的宽容策略而非错误。
pub fn aggregate(records: &[RainRecord]) -> RainSummary {
    // 按 (年, 月) 分组，BTreeMap 保证月序升序
    let mut groups: BTreeMap<(i32, u32), Vec<(chrono::NaiveDate, RainRecord)>> = BTreeMap::new();

    for record in records {
        let Some(date) = record.parsed_date() else {
            continue;
        };
        use chrono::Datelike;
        groups
            .entry((date.year(), date.month()))
            .or_default()
            .push((date, record.clone()));
    }

    let mut buckets = Vec::with_capacity(groups.len());
    let mut global_total = KahanSum::new();
    let mut global_count = 0usize;

    for ((year, month), mut entries) in groups {
        // 稳定排序：同日期保持输入相对顺序
        entries.sort_by_key(|(date, _)| *date);

        let mut total = KahanSum::new();
        let mut rainy_days = 0usize;
        let mut max_day: Option<&RainRecord> = None;

        for (_, record) in &entries {
            total.add(record.precipitation_mm);
            if record.is_rainy() {
                rainy_days += 1;
            }
            // 严格大于才替换：并列取日期序第一条
            match max_day {
                Some(current) if record.precipitation_mm <= current.precipitation_mm => {}
                _ => max_day = Some(record),
            }
        }

        let n = entries.len();
        let total_value = total.value();
        global_total.add(total_value);
        global_count += n;

        buckets.push(MonthBucket {
            year,
            month,
            max_day: max_day.cloned(),
            total: total_value,
            avg_per_day: safe_div(total_value, n as f64, 0.0),
            rainy_days,
            dry_days: n - rainy_days,
            records: entries.into_iter().map(|(_, r)| r).collect(),
        });
    }

    let total = global_total.value();
    RainSummary {
        buckets,
        count: global_count,
        total,
        avg: safe_div(total, global_count as f64, 0.0),
    }
}

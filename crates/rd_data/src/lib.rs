// crates/rd_data/src/lib.rs

//! 降雨数据模块
//!
//! 提供真实降雨观测数据的获取、持久化与统计，包括：
//! - 记录类型 (record) - 持久化文件的稳定字段契约
//! - 统计聚合 (stats) - 按月分桶与全局汇总
//! - 本地存储 (store) - 原子写入的 JSON 文件
//! - 远程获取 (fetch) - Open-Meteo 日降雨量客户端
//!
//! # 容错策略
//!
//! 数据源是外部的、偶尔畸形的：日期无法解析的记录被静默丢弃
//! （宽容策略而非错误）；成对数组缺失或长度不匹配是取数层错误，
//! 统计层假定收到的记录总是良构的。

pub mod error;
pub mod fetch;
pub mod record;
pub mod stats;
pub mod store;

pub use error::DataError;
pub use fetch::{fetch, fetch_and_store, FetchRequest};
pub use record::RainRecord;
pub use stats::{aggregate, MonthBucket, RainSummary};
pub use store::{load_records, save_records};

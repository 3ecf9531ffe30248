// crates/rd_config/src/lib.rs

//! RainDrop 配置层
//!
//! 定义模拟与数据管线的全部配置参数，使用 JSON 序列化，
//! 加载时统一验证。
//!
//! # 模块概览
//!
//! - [`simulation`]: 模拟配置 [`SimulationConfig`]（风速、雨滴直径、下落高度等）
//! - [`data`]: 数据管线配置 [`DataConfig`]（取数坐标、日期范围、存储路径）
//! - [`error`]: 配置层错误类型

pub mod data;
pub mod error;
pub mod simulation;

pub use data::DataConfig;
pub use error::ConfigError;
pub use simulation::SimulationConfig;

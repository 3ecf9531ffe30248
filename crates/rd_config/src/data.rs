// crates/rd_config/src/data.rs

//! DataConfig - 数据管线配置
//!
//! 定义降雨观测数据的获取坐标、日期范围与本地存储路径。
//! 日期以 ISO 字符串（YYYY-MM-DD）存储，缺省时由取数层补全为
//! "截至今天的最近三个月"。

use rd_foundation::ensure;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// 数据管线配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 纬度 [度]
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// 经度 [度]
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// 起始日期（ISO，YYYY-MM-DD），缺省时取三个月前
    #[serde(default)]
    pub start_date: Option<String>,

    /// 结束日期（ISO，YYYY-MM-DD），缺省时取今天
    #[serde(default)]
    pub end_date: Option<String>,

    /// 本地降雨数据文件路径
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
}

fn default_latitude() -> f64 {
    4.72
}
fn default_longitude() -> f64 {
    -74.09
}
fn default_data_path() -> PathBuf {
    PathBuf::from("data/rain.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            start_date: None,
            end_date: None,
            data_path: default_data_path(),
        }
    }
}

impl DataConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;

        let config: DataConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.latitude.is_finite() && self.latitude.abs() <= 90.0,
            ConfigError::invalid("latitude", self.latitude, "纬度必须在 [-90, 90] 范围内")
        );

        ensure!(
            self.longitude.is_finite() && self.longitude.abs() <= 180.0,
            ConfigError::invalid("longitude", self.longitude, "经度必须在 [-180, 180] 范围内")
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_config() {
        let config = DataConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.latitude - 4.72).abs() < 1e-12);
        assert!(config.start_date.is_none());
    }

    #[test]
    fn test_invalid_latitude() {
        let mut config = DataConfig::default();
        config.latitude = 95.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = DataConfig {
            start_date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: DataConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.start_date.as_deref(), Some("2024-01-01"));
    }
}

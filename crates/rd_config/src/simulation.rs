// crates/rd_config/src/simulation.rs

//! SimulationConfig - 模拟配置
//!
//! 定义雨滴模拟的全部外部参数，使用纯 f64 存储以便 JSON 序列化。
//! 派生量（质量、截面积、终端速度）不在此处：它们由物理层在参数
//! 变更时重新计算。
//!
//! 建议的 UI 调节范围（验证采用更宽松的硬边界）：
//! - 风速 0–20 m/s
//! - 雨滴直径 1–5 mm
//! - 下落高度 100–1000 m
//! - 空气密度 1.0–1.3 kg/m³

use rd_foundation::ensure;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// 模拟配置
///
/// 参数变更在下一个 tick 边界生效，绝不会在 tick 中途被应用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 水平风速 [m/s]，对所有雨滴恒定
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,

    /// 雨滴直径 [mm]
    #[serde(default = "default_drop_diameter_mm")]
    pub drop_diameter_mm: f64,

    /// 下落高度 / 世界高度 [m]
    #[serde(default = "default_fall_height_m")]
    pub fall_height_m: f64,

    /// 空气密度 [kg/m³]
    #[serde(default = "default_air_density")]
    pub air_density: f64,

    /// 阻力系数（球体默认 0.47）
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f64,

    /// 重力加速度 [m/s²]
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// 雨滴数量（集合大小，模拟期间恒定）
    #[serde(default = "default_drop_count")]
    pub drop_count: usize,

    /// 单个 tick 允许的最大时间步长 [s]，防止帧率抖动导致不稳定
    #[serde(default = "default_max_dt")]
    pub max_dt: f64,

    /// 显示力向量（true）还是速度向量（false）
    #[serde(default)]
    pub show_force_vectors: bool,

    /// 暂停标志，暂停时 tick 不改变任何状态
    #[serde(default)]
    pub paused: bool,
}

fn default_wind_speed() -> f64 {
    3.0
}
fn default_drop_diameter_mm() -> f64 {
    2.5
}
fn default_fall_height_m() -> f64 {
    300.0
}
fn default_air_density() -> f64 {
    1.225
}
fn default_drag_coefficient() -> f64 {
    0.47
}
fn default_gravity() -> f64 {
    9.81
}
fn default_drop_count() -> usize {
    90
}
fn default_max_dt() -> f64 {
    0.05
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            wind_speed: default_wind_speed(),
            drop_diameter_mm: default_drop_diameter_mm(),
            fall_height_m: default_fall_height_m(),
            air_density: default_air_density(),
            drag_coefficient: default_drag_coefficient(),
            gravity: default_gravity(),
            drop_count: default_drop_count(),
            max_dt: default_max_dt(),
            show_force_vectors: false,
            paused: false,
        }
    }
}

impl SimulationConfig {
    /// 雨滴直径 [m]
    pub fn drop_diameter_m(&self) -> f64 {
        self.drop_diameter_mm / 1000.0
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;

        let config: SimulationConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(
            self.wind_speed.is_finite() && (0.0..=50.0).contains(&self.wind_speed),
            ConfigError::invalid("wind_speed", self.wind_speed, "风速必须在 [0, 50] m/s 范围内")
        );

        ensure!(
            self.drop_diameter_mm.is_finite()
                && self.drop_diameter_mm > 0.0
                && self.drop_diameter_mm <= 10.0,
            ConfigError::invalid(
                "drop_diameter_mm",
                self.drop_diameter_mm,
                "雨滴直径必须在 (0, 10] mm 范围内",
            )
        );

        ensure!(
            self.fall_height_m.is_finite() && self.fall_height_m > 0.0,
            ConfigError::invalid("fall_height_m", self.fall_height_m, "下落高度必须为正")
        );

        ensure!(
            self.air_density.is_finite() && self.air_density > 0.0,
            ConfigError::invalid("air_density", self.air_density, "空气密度必须为正")
        );

        ensure!(
            self.drag_coefficient.is_finite() && self.drag_coefficient > 0.0,
            ConfigError::invalid("drag_coefficient", self.drag_coefficient, "阻力系数必须为正")
        );

        ensure!(
            self.gravity.is_finite() && self.gravity > 0.0,
            ConfigError::invalid("gravity", self.gravity, "重力必须为正")
        );

        ensure!(
            self.drop_count > 0,
            ConfigError::invalid("drop_count", self.drop_count, "雨滴数量必须至少为 1")
        );

        ensure!(
            self.max_dt.is_finite() && self.max_dt > 0.0,
            ConfigError::invalid("max_dt", self.max_dt, "最大时间步长必须为正")
        );

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.drag_coefficient - 0.47).abs() < 1e-12);
        assert_eq!(config.drop_count, 90);
    }

    #[test]
    fn test_invalid_wind() {
        let mut config = SimulationConfig::default();
        config.wind_speed = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_diameter() {
        let mut config = SimulationConfig::default();
        config.drop_diameter_mm = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_diameter_conversion() {
        let config = SimulationConfig::default();
        assert!((config.drop_diameter_m() - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert!((parsed.wind_speed - config.wind_speed).abs() < 1e-12);
        assert_eq!(parsed.paused, config.paused);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: SimulationConfig = serde_json::from_str(r#"{"wind_speed": 7.5}"#).unwrap();
        assert!((parsed.wind_speed - 7.5).abs() < 1e-12);
        assert!((parsed.fall_height_m - 300.0).abs() < 1e-12);
    }
}

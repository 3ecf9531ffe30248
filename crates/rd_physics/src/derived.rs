// crates/rd_physics/src/derived.rs

//! 派生物理量缓存
//!
//! 质量、截面积和终端速度只依赖直径、空气密度和阻力系数，
//! 因此在参数变更时重算一次即可，不需要逐帧重算。
//! 缓存由引擎持有，参数变更（而非时间）使其失效。

use rd_config::SimulationConfig;
use serde::Serialize;

use crate::scalar::{cross_section_area, drop_mass, terminal_velocity, WATER_DENSITY};

/// 终端速度的安全回退值 [m/s]
///
/// 直径退化时积分器用它代替 0/NaN，对应中雨雨滴的典型终端速度。
pub const FALLBACK_TERMINAL_VELOCITY: f64 = 9.0;

/// 派生物理量
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DerivedQuantities {
    /// 雨滴质量 [kg]
    pub mass: f64,
    /// 横截面积 [m²]
    pub area: f64,
    /// 终端垂直速度 [m/s]，保证为有限正数
    pub terminal_velocity: f64,
}

impl DerivedQuantities {
    /// 从配置重算派生量
    ///
    /// 终端速度退化（≤0 或非有限）时替换为
    /// [`FALLBACK_TERMINAL_VELOCITY`]，保证积分器的阻力项分母安全。
    pub fn from_config(config: &SimulationConfig) -> Self {
        let d = config.drop_diameter_m();
        let mass = drop_mass(d, WATER_DENSITY);
        let area = cross_section_area(d);
        let vt = terminal_velocity(
            mass,
            config.air_density,
            area,
            config.drag_coefficient,
            config.gravity,
        );

        let terminal_velocity = if vt.is_finite() && vt > 0.0 {
            vt
        } else {
            FALLBACK_TERMINAL_VELOCITY
        };

        Self {
            mass,
            area,
            terminal_velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_from_default_config() {
        let config = SimulationConfig::default();
        let derived = DerivedQuantities::from_config(&config);

        assert!(derived.mass > 0.0);
        assert!(derived.area > 0.0);
        // 2.5 mm 雨滴的终端速度应在物理合理范围内
        assert!(derived.terminal_velocity > 5.0);
        assert!(derived.terminal_velocity < 15.0);
    }

    #[test]
    fn test_derived_fallback_on_degenerate_density() {
        let mut config = SimulationConfig::default();
        // 绕过配置验证直接构造退化参数
        config.air_density = 0.0;
        let derived = DerivedQuantities::from_config(&config);
        assert!((derived.terminal_velocity - FALLBACK_TERMINAL_VELOCITY).abs() < 1e-12);
    }

    #[test]
    fn test_derived_recompute_on_change() {
        let mut config = SimulationConfig::default();
        let before = DerivedQuantities::from_config(&config);
        config.drop_diameter_mm = 5.0;
        let after = DerivedQuantities::from_config(&config);
        // 直径增大 → 质量和终端速度增大
        assert!(after.mass > before.mass);
        assert!(after.terminal_velocity > before.terminal_velocity);
    }
}

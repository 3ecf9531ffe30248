// crates/rd_physics/src/forces.rs

//! 力模型
//!
//! 给定雨滴的瞬时速度与几何派生量，计算三个力向量：
//!
//! - 重力: 大小 m·g，方向纯垂直向下
//! - 阻力: 大小 ½ρ_气 A C_d |v|²，方向与瞬时速度相反
//! - 合力: 重力与阻力的分量和
//!
//! 坐标约定与状态层一致：y 正方向向下。此模型仅用于向量显示，
//! 与引擎的一维约化阻力律相互独立；在同一速度下二者的垂直分量
//! 数值一致（见测试）。

use glam::DVec2;
use rd_config::SimulationConfig;

use crate::derived::DerivedQuantities;

/// 力模型
///
/// 纯值类型，无状态；每次求值独立。
#[derive(Debug, Clone, Copy)]
pub struct ForceModel {
    /// 雨滴质量 [kg]
    pub mass: f64,
    /// 横截面积 [m²]
    pub area: f64,
    /// 空气密度 [kg/m³]
    pub air_density: f64,
    /// 阻力系数
    pub drag_coefficient: f64,
    /// 重力加速度 [m/s²]
    pub gravity: f64,
}

impl ForceModel {
    /// 从配置与派生量构造
    pub fn new(config: &SimulationConfig, derived: &DerivedQuantities) -> Self {
        Self {
            mass: derived.mass,
            area: derived.area,
            air_density: config.air_density,
            drag_coefficient: config.drag_coefficient,
            gravity: config.gravity,
        }
    }

    /// 重力向量 [N]（仅垂直分量，向下为正）
    #[inline]
    pub fn gravity_force(&self) -> DVec2 {
        DVec2::new(0.0, self.mass * self.gravity)
    }

    /// 阻力向量 [N]
    ///
    /// 大小 ½ρAC_d|v|²，方向由 atan2 求得的速度方向取反。
    /// 速度为零时阻力为零向量。
    #[inline]
    pub fn drag_force(&self, velocity: DVec2) -> DVec2 {
        let speed_sq = velocity.length_squared();
        let magnitude = 0.5 * self.air_density * self.area * self.drag_coefficient * speed_sq;

        let angle = velocity.y.atan2(velocity.x);
        DVec2::new(-angle.cos() * magnitude, -angle.sin() * magnitude)
    }

    /// 合力向量 [N]：重力与阻力的分量和（不是大小相加）
    #[inline]
    pub fn net_force(&self, velocity: DVec2) -> DVec2 {
        self.gravity_force() + self.drag_force(velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_config::SimulationConfig;

    fn model() -> ForceModel {
        let config = SimulationConfig::default();
        let derived = DerivedQuantities::from_config(&config);
        ForceModel::new(&config, &derived)
    }

    #[test]
    fn test_gravity_is_vertical() {
        let m = model();
        let fg = m.gravity_force();
        assert!(fg.x.abs() < 1e-15);
        assert!((fg.y - m.mass * m.gravity).abs() < 1e-15);
    }

    #[test]
    fn test_drag_opposes_velocity() {
        let m = model();
        let v = DVec2::new(3.0, 7.0);
        let fd = m.drag_force(v);
        // 与速度方向点积为负
        assert!(fd.dot(v) < 0.0);
        // 大小 ½ρAC_d|v|²
        let expected = 0.5 * m.air_density * m.area * m.drag_coefficient * v.length_squared();
        assert!((fd.length() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_drag_zero_velocity() {
        let m = model();
        let fd = m.drag_force(DVec2::ZERO);
        assert!(fd.length() < 1e-15);
    }

    #[test]
    fn test_net_force_is_componentwise_sum() {
        let m = model();
        let v = DVec2::new(2.0, 5.0);
        let net = m.net_force(v);
        let sum = m.gravity_force() + m.drag_force(v);
        assert!((net - sum).length() < 1e-15);
    }

    #[test]
    fn test_vertical_consistency_with_integrator_law() {
        // 纯垂直速度下，合力的垂直分量必须等于
        // m · g(1 − (v_y/V_t)²) —— 引擎一维约化律乘以质量
        let config = SimulationConfig::default();
        let derived = DerivedQuantities::from_config(&config);
        let m = ForceModel::new(&config, &derived);

        let vt = derived.terminal_velocity;
        for vy in [0.0, 2.0, 5.0, vt, vt * 1.5] {
            let net = m.net_force(DVec2::new(0.0, vy));
            let expected = derived.mass * config.gravity * (1.0 - (vy / vt).powi(2));
            assert!(
                (net.y - expected).abs() < 1e-9,
                "vy={}: net={} expected={}",
                vy,
                net.y,
                expected
            );
        }
    }

    #[test]
    fn test_net_force_zero_at_terminal_velocity() {
        let config = SimulationConfig::default();
        let derived = DerivedQuantities::from_config(&config);
        let m = ForceModel::new(&config, &derived);

        let net = m.net_force(DVec2::new(0.0, derived.terminal_velocity));
        assert!(net.y.abs() < 1e-9);
    }
}

// crates/rd_physics/src/scalar.rs

//! 标量物理函数
//!
//! 纯函数、无副作用、输入确定则输出确定。雨滴建模为球体：
//!
//! - 质量: m = ρ_水 · (4/3)π(d/2)³
//! - 截面积: A = π(d/2)²
//! - 终端速度: 重力与二次阻力平衡，V_t = √(2mg / (ρ_气 A C_d))
//! - 解析下落时间: 由 H = (V_t²/g)·ln cosh(gt/V_t) 反解
//!
//! 所有函数对退化输入（零直径、零密度）返回安全的回退值而不是
//! NaN/Inf，调用方不需要额外防护。

use rd_foundation::float::safe_sqrt;

// ============================================================================
// 物理常量
// ============================================================================

/// 水密度 [kg/m³]
pub const WATER_DENSITY: f64 = 1000.0;

/// 标准重力加速度 [m/s²]
pub const STANDARD_GRAVITY: f64 = 9.81;

/// 球体阻力系数
pub const SPHERE_DRAG_COEFFICIENT: f64 = 0.47;

/// 直径下限 [m]，负直径或零直径被钳到此值
pub const MIN_DIAMETER: f64 = 1e-6;

/// 下落时间回退公式中终端速度的下限 [m/s]，防止除零
pub const FALL_TIME_VELOCITY_FLOOR: f64 = 1e-3;

// ============================================================================
// 标量函数
// ============================================================================

/// 球形雨滴质量 [kg]
///
/// 直径 ≤ 0 时按 [`MIN_DIAMETER`] 处理（钳制而非报错，调用方负责
/// 在配置层验证）。
#[inline]
pub fn drop_mass(diameter_m: f64, water_density: f64) -> f64 {
    let d = diameter_m.max(MIN_DIAMETER);
    let r = d / 2.0;
    let volume = (4.0 / 3.0) * std::f64::consts::PI * r * r * r;
    water_density * volume
}

/// 雨滴横截面积 [m²]
#[inline]
pub fn cross_section_area(diameter_m: f64) -> f64 {
    let d = diameter_m.max(MIN_DIAMETER);
    let r = d / 2.0;
    std::f64::consts::PI * r * r
}

/// 终端垂直速度 [m/s]
///
/// 由重力等于二次阻力导出：V_t = √(2mg / (ρ_气 A C_d))。
/// 分母 ≤ 0 或结果非有限时返回 0，由上层（派生量缓存）替换为
/// 安全的正回退值。
#[inline]
pub fn terminal_velocity(
    mass_kg: f64,
    air_density: f64,
    area_m2: f64,
    drag_coefficient: f64,
    g: f64,
) -> f64 {
    let denom = air_density * area_m2 * drag_coefficient;
    if denom <= 0.0 || !denom.is_finite() {
        return 0.0;
    }
    let vt = safe_sqrt(2.0 * mass_kg * g / denom);
    if vt.is_finite() {
        vt
    } else {
        0.0
    }
}

/// 合速度大小 [m/s]（欧几里得范数）
#[inline]
pub fn resultant_speed(vx: f64, vy: f64) -> f64 {
    vx.hypot(vy)
}

/// 入射角 [度]：垂直轴与合速度向量之间的夹角
///
/// 对两个分量都取绝对值，因此结果恒在 [0°, 90°]，不区分倾斜方向。
/// 这是有意的简化。
#[inline]
pub fn incidence_angle_deg(vx: f64, vy: f64) -> f64 {
    vx.abs().atan2(vy.abs()).to_degrees()
}

/// 解析下落时间 [s]：二次阻力下从静止下落高度 H 所需的时间
///
/// 闭式解 t = (V_t/g)·acosh(exp(gH/V_t²))。当 gH/V_t² 很大时
/// 中间项 exp(k) 溢出为无穷，此时回退到线性近似 H / max(V_t, ε)。
/// 回退是有意的近似而非错误：在溢出区间雨滴几乎全程以终端速度
/// 下落，线性近似的相对误差很小。
#[inline]
pub fn analytic_fall_time(height_m: f64, terminal_velocity: f64, g: f64) -> f64 {
    if height_m <= 0.0 {
        return 0.0;
    }

    if terminal_velocity > 0.0 && g > 0.0 {
        let k = g * height_m / (terminal_velocity * terminal_velocity);
        let t = terminal_velocity / g * k.exp().acosh();
        if t.is_finite() {
            return t;
        }
    }

    height_m / terminal_velocity.max(FALL_TIME_VELOCITY_FLOOR)
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_formula() {
        let d = 0.003;
        let expected = std::f64::consts::PI * (d / 2.0) * (d / 2.0);
        assert!((cross_section_area(d) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_mass_cubic_scaling() {
        // 直径翻倍，质量 ×8，截面积 ×4
        let m1 = drop_mass(0.002, WATER_DENSITY);
        let m2 = drop_mass(0.004, WATER_DENSITY);
        assert!((m2 / m1 - 8.0).abs() < 1e-9);

        let a1 = cross_section_area(0.002);
        let a2 = cross_section_area(0.004);
        assert!((a2 / a1 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_mass_negative_diameter_clamped() {
        let m = drop_mass(-1.0, WATER_DENSITY);
        assert!(m > 0.0);
        assert!(m.is_finite());
    }

    #[test]
    fn test_terminal_velocity_monotonicity() {
        let a = cross_section_area(0.0025);
        let m = drop_mass(0.0025, WATER_DENSITY);
        let base = terminal_velocity(m, 1.2, a, 0.47, STANDARD_GRAVITY);

        // 质量增大 → V_t 增大
        assert!(terminal_velocity(m * 2.0, 1.2, a, 0.47, STANDARD_GRAVITY) > base);
        // 空气密度、截面积、阻力系数增大 → V_t 减小
        assert!(terminal_velocity(m, 1.3, a, 0.47, STANDARD_GRAVITY) < base);
        assert!(terminal_velocity(m, 1.2, a * 2.0, 0.47, STANDARD_GRAVITY) < base);
        assert!(terminal_velocity(m, 1.2, a, 0.6, STANDARD_GRAVITY) < base);
    }

    #[test]
    fn test_terminal_velocity_degenerate() {
        assert!((terminal_velocity(1.0, 0.0, 1.0, 0.47, 9.81)).abs() < 1e-15);
        assert!((terminal_velocity(1.0, 1.2, 0.0, 0.47, 9.81)).abs() < 1e-15);
        assert!((terminal_velocity(1.0, 1.2, 1.0, 0.0, 9.81)).abs() < 1e-15);
    }

    #[test]
    fn test_resultant_speed_axis_aligned() {
        assert!((resultant_speed(3.0, 0.0) - 3.0).abs() < 1e-12);
        assert!((resultant_speed(-3.0, 0.0) - 3.0).abs() < 1e-12);
        assert!((resultant_speed(0.0, 4.0) - 4.0).abs() < 1e-12);
        assert!((resultant_speed(3.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_incidence_angle_bounds() {
        // 纯垂直 → 0°，纯水平 → 90°
        assert!((incidence_angle_deg(0.0, 5.0)).abs() < 1e-12);
        assert!((incidence_angle_deg(5.0, 0.0) - 90.0).abs() < 1e-12);
        // 符号不影响结果
        let a1 = incidence_angle_deg(3.0, 4.0);
        let a2 = incidence_angle_deg(-3.0, -4.0);
        assert!((a1 - a2).abs() < 1e-12);
        assert!((0.0..=90.0).contains(&a1));
        // 45°
        assert!((incidence_angle_deg(1.0, 1.0) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_fall_time_normal_range() {
        // H=300 m, V_t≈9 m/s：解析值应略大于 H/V_t（加速段更慢）
        let t = analytic_fall_time(300.0, 9.0, 9.81);
        assert!(t.is_finite());
        assert!(t > 300.0 / 9.0);
        assert!(t < 300.0 / 9.0 + 5.0);
    }

    #[test]
    fn test_fall_time_overflow_fallback() {
        // gH/V_t² > 700 时 exp 溢出，回退到 H/V_t（有意的近似）
        let vt = 0.1;
        let h = 1000.0;
        assert!(9.81 * h / (vt * vt) > 700.0);
        let t = analytic_fall_time(h, vt, 9.81);
        assert!((t - h / vt).abs() < 1e-9);
    }

    #[test]
    fn test_fall_time_zero_terminal_velocity() {
        // V_t = 0 时使用速度下限，结果有限
        let t = analytic_fall_time(100.0, 0.0, 9.81);
        assert!(t.is_finite());
        assert!((t - 100.0 / FALL_TIME_VELOCITY_FLOOR).abs() < 1e-6);
    }

    #[test]
    fn test_fall_time_zero_height() {
        assert!((analytic_fall_time(0.0, 9.0, 9.81)).abs() < 1e-15);
    }
}

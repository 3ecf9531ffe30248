// crates/rd_physics/src/engine/integrator.rs

//! 雨滴集合推进器
//!
//! 拥有雨滴集合并逐帧推进。每个 tick：
//!
//! 1. 归一化坐标 → 世界坐标（米）
//! 2. 垂直加速度 a_y = g(1 − (v_y/V_t)²)（重力减二次阻力的一维约化）
//! 3. 半隐式欧拉：先更新速度，再用**更新后**的速度更新位置——
//!    对这类速度依赖的恢复性加速度无条件稳定
//! 4. 水平位置 x += wind·dt（惯性，无水平阻力）
//! 5. 水平回绕（模世界宽度）、垂直回收（落地 → y=0, v_y=0）
//! 6. 写回归一化坐标
//!
//! 雨滴之间无相互作用，单个 tick 内的更新顺序无关紧要，
//! 因此逐滴更新用 rayon 并行；tick 与 tick 之间严格串行。
//!
//! # 生命周期
//!
//! 显式 create → tick* → drop。引擎值被丢弃即为销毁；暂停标志置位
//! 时 tick 不做任何状态变更。没有模块级全局状态。

use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rd_config::{ConfigError, SimulationConfig};
use rd_foundation::float::{clamp_valid, finite_or};
use serde::Serialize;

use crate::derived::DerivedQuantities;
use crate::forces::ForceModel;
use crate::scalar::{incidence_angle_deg, resultant_speed};
use crate::state::{DropEnsemble, DropState};

/// 默认世界宽高比（渲染面宽 / 高）
pub const DEFAULT_ASPECT_RATIO: f64 = 1.5;

/// 模拟引擎
///
/// 独占拥有雨滴集合；参数变更通过 [`SimulationEngine::set_config`]
/// 在 tick 边界生效，绝不会中途应用。
#[derive(Debug)]
pub struct SimulationEngine {
    /// 当前配置
    config: SimulationConfig,
    /// 派生量缓存，参数变更时重算
    derived: DerivedQuantities,
    /// 雨滴集合
    ensemble: DropEnsemble,
    /// 世界宽度 [m] = 下落高度 × 宽高比
    world_width_m: f64,
    /// 渲染面宽高比
    aspect_ratio: f64,
    /// 累计模拟时间 [s]
    time: f64,
    /// 累计 tick 数
    ticks: u64,
}

impl SimulationEngine {
    /// 创建引擎（随机初始位置）
    pub fn new(config: SimulationConfig, aspect_ratio: f64) -> Result<Self, ConfigError> {
        let mut rng = StdRng::from_os_rng();
        Self::with_rng(config, aspect_ratio, &mut rng)
    }

    /// 创建引擎（固定种子，可重现）
    pub fn with_seed(
        config: SimulationConfig,
        aspect_ratio: f64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_rng(config, aspect_ratio, &mut rng)
    }

    fn with_rng(
        config: SimulationConfig,
        aspect_ratio: f64,
        rng: &mut StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let ensemble = DropEnsemble::random(config.drop_count, rng);
        let derived = DerivedQuantities::from_config(&config);
        let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            DEFAULT_ASPECT_RATIO
        };

        Ok(Self {
            world_width_m: config.fall_height_m * aspect_ratio,
            aspect_ratio,
            derived,
            ensemble,
            config,
            time: 0.0,
            ticks: 0,
        })
    }

    /// 更新配置，派生量立即重算
    ///
    /// 调用发生在两个 tick 之间，即 tick 边界。`drop_count` 仅在
    /// 创建时生效：集合大小在引擎生命周期内恒定。
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.derived = DerivedQuantities::from_config(&config);
        self.world_width_m = config.fall_height_m * self.aspect_ratio;
        self.config = config;
        Ok(())
    }

    /// 更新渲染面宽高比（世界宽度随之变化）
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
            self.world_width_m = self.config.fall_height_m * aspect_ratio;
        }
    }

    /// 推进一个 tick
    ///
    /// dt 被钳到 `[0, max_dt]`，负值与非有限值按 0 处理。暂停时
    /// 不做任何变更。dt = 0 时合法状态保持不变（幂等）。
    pub fn tick(&mut self, dt: f64) {
        if self.config.paused {
            return;
        }

        let dt = clamp_valid(dt, 0.0, self.config.max_dt, 0.0);

        let g = self.config.gravity;
        let vt = self.derived.terminal_velocity;
        let wind = self.config.wind_speed;
        let width = self.world_width_m;
        let height = self.config.fall_height_m;

        self.ensemble
            .drops
            .par_iter_mut()
            .for_each(|drop| step_drop(drop, dt, g, vt, wind, width, height));

        self.time += dt;
        self.ticks += 1;
    }

    /// 当前配置
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// 当前派生量
    pub fn derived(&self) -> &DerivedQuantities {
        &self.derived
    }

    /// 雨滴集合（只读）
    pub fn ensemble(&self) -> &DropEnsemble {
        &self.ensemble
    }

    /// 雨滴集合（可变）
    ///
    /// 供测试与诊断工具构造特定状态；正常路径下只有引擎自身
    /// 推进状态。
    pub fn ensemble_mut(&mut self) -> &mut DropEnsemble {
        &mut self.ensemble
    }

    /// 世界宽度 [m]
    pub fn world_width_m(&self) -> f64 {
        self.world_width_m
    }

    /// 累计模拟时间 [s]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// 累计 tick 数
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// 按步长采样向量显示数据
    ///
    /// 每 `stride` 个雨滴取一个样本，避免可视化饱和
    /// （stride = 0 按 1 处理）。
    pub fn sample_vectors(&self, stride: usize) -> Vec<VectorSample> {
        let stride = stride.max(1);
        let model = ForceModel::new(&self.config, &self.derived);
        let wind = self.config.wind_speed;

        self.ensemble
            .drops
            .iter()
            .step_by(stride)
            .map(|drop| {
                let velocity = DVec2::new(wind, drop.vy);
                VectorSample {
                    x: drop.x,
                    y: drop.y,
                    velocity,
                    gravity: model.gravity_force(),
                    drag: model.drag_force(velocity),
                    net: model.net_force(velocity),
                    speed: resultant_speed(wind, drop.vy),
                    angle_deg: incidence_angle_deg(wind, drop.vy),
                }
            })
            .collect()
    }

    /// 集合统计
    pub fn stats(&self) -> EngineStats {
        let n = self.ensemble.len();
        let (sum_vy, max_vy) = self
            .ensemble
            .drops
            .iter()
            .fold((0.0_f64, 0.0_f64), |(sum, max), d| {
                (sum + d.vy, max.max(d.vy))
            });

        EngineStats {
            ticks: self.ticks,
            time: self.time,
            drop_count: n,
            mean_vy: if n > 0 { sum_vy / n as f64 } else { 0.0 },
            max_vy,
            terminal_velocity: self.derived.terminal_velocity,
        }
    }
}

/// 推进单个雨滴
///
/// 与其它雨滴无关，可并行调用。落地回收是唯一的状态转换：
/// 不是弹跳也不是销毁，雨滴以零初速从顶部重新进入。
fn step_drop(
    drop: &mut DropState,
    dt: f64,
    g: f64,
    vt: f64,
    wind: f64,
    width: f64,
    height: f64,
) {
    // 已在地面（或状态被污染）的雨滴在任意 dt ≥ 0 下回收，
    // 本 tick 不再积分：回收后的雨滴以零初速从顶部重新进入
    if !drop.y.is_finite() || drop.y >= 1.0 || !drop.vy.is_finite() {
        drop.y = 0.0;
        drop.vy = 0.0;
        return;
    }

    if dt <= 0.0 {
        return;
    }

    // 归一化 → 世界坐标
    let mut x_m = drop.x * width;
    let mut y_m = drop.y * height;

    // 一维约化阻力律；vt 由派生量缓存保证为有限正数
    let ay = g * (1.0 - (drop.vy / vt) * (drop.vy / vt));

    // 半隐式欧拉：速度先行，位置使用更新后的速度
    let mut vy = finite_or(drop.vy + ay * dt, 0.0);
    y_m += vy * dt;

    // 水平方向无阻力：恒定风速（牛顿第一定律）
    x_m += wind * dt;

    // 水平回绕（视觉便利，非物理）
    x_m = x_m.rem_euclid(width);

    // 垂直回收
    if y_m >= height {
        y_m = 0.0;
        vy = 0.0;
    }

    // 写回归一化坐标；任何非有限值在此被拦截
    let mut nx = finite_or(x_m / width, 0.0);
    if !(0.0..1.0).contains(&nx) {
        nx = 0.0;
    }
    let mut ny = finite_or(y_m / height, 0.0);
    if !(0.0..1.0).contains(&ny) {
        ny = 0.0;
    }

    drop.x = nx;
    drop.y = ny;
    drop.vy = vy;
}

/// 向量显示样本（速度向量与力向量，供渲染层使用）
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VectorSample {
    /// 归一化水平位置
    pub x: f64,
    /// 归一化垂直位置
    pub y: f64,
    /// 速度向量 [m/s]（x = 风速，y = 垂直速度）
    pub velocity: DVec2,
    /// 重力向量 [N]
    pub gravity: DVec2,
    /// 阻力向量 [N]
    pub drag: DVec2,
    /// 合力向量 [N]
    pub net: DVec2,
    /// 合速度大小 [m/s]
    pub speed: f64,
    /// 入射角 [度]
    pub angle_deg: f64,
}

/// 引擎统计
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EngineStats {
    /// 累计 tick 数
    pub ticks: u64,
    /// 累计模拟时间 [s]
    pub time: f64,
    /// 雨滴数量
    pub drop_count: usize,
    /// 平均垂直速度 [m/s]
    pub mean_vy: f64,
    /// 最大垂直速度 [m/s]
    pub max_vy: f64,
    /// 当前终端速度 [m/s]
    pub terminal_velocity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SimulationEngine {
        SimulationEngine::with_seed(SimulationConfig::default(), 1.5, 42).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let e = engine();
        assert_eq!(e.ensemble().len(), 90);
        assert!(e.ensemble().invariants_hold());
        assert!((e.world_width_m() - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.drop_diameter_mm = -1.0;
        assert!(SimulationEngine::with_seed(config, 1.5, 0).is_err());
    }

    #[test]
    fn test_tick_advances_time() {
        let mut e = engine();
        e.tick(0.01);
        e.tick(0.01);
        assert_eq!(e.ticks(), 2);
        assert!((e.time() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_dt_clamped_to_max() {
        let mut e = engine();
        e.tick(10.0);
        // 时间只推进 max_dt
        assert!((e.time() - e.config().max_dt).abs() < 1e-12);
    }

    #[test]
    fn test_paused_is_noop() {
        let mut e = engine();
        let before = e.ensemble().drops.clone();

        let mut config = e.config().clone();
        config.paused = true;
        e.set_config(config).unwrap();

        e.tick(0.05);
        for (a, b) in before.iter().zip(e.ensemble().drops.iter()) {
            assert!((a.x - b.x).abs() < 1e-15);
            assert!((a.y - b.y).abs() < 1e-15);
            assert!((a.vy - b.vy).abs() < 1e-15);
        }
        assert_eq!(e.ticks(), 0);
    }

    #[test]
    fn test_set_config_recomputes_derived() {
        let mut e = engine();
        let vt_before = e.derived().terminal_velocity;

        let mut config = e.config().clone();
        config.drop_diameter_mm = 5.0;
        e.set_config(config).unwrap();

        assert!(e.derived().terminal_velocity > vt_before);
    }

    #[test]
    fn test_sample_vectors_stride() {
        let e = engine();
        let samples = e.sample_vectors(15);
        assert_eq!(samples.len(), 6); // 90 / 15

        for s in &samples {
            assert!((s.velocity.x - e.config().wind_speed).abs() < 1e-12);
            assert!(s.angle_deg >= 0.0 && s.angle_deg <= 90.0);
        }
    }

    #[test]
    fn test_sample_serializes_for_display_layer() {
        // 向量样本要跨进程传给渲染层，序列化契约不能悄悄变化
        let e = engine();
        let samples = e.sample_vectors(45);
        let json = serde_json::to_string(&samples).unwrap();
        assert!(json.contains("\"angle_deg\""));
        assert!(json.contains("\"net\""));
    }

    #[test]
    fn test_stats() {
        let mut e = engine();
        for _ in 0..100 {
            e.tick(0.02);
        }
        let stats = e.stats();
        assert_eq!(stats.drop_count, 90);
        assert!(stats.mean_vy > 0.0);
        assert!(stats.max_vy <= stats.terminal_velocity + 1e-6);
    }
}

// crates/rd_physics/src/lib.rs

//! 雨滴物理模块
//!
//! 提供重力 + 二次空气阻力下的雨滴运动学求解，包括：
//! - 标量物理函数 (scalar) - 质量、截面积、终端速度、解析下落时间
//! - 派生量缓存 (derived) - 参数变更时重算，而非逐帧重算
//! - 力模型 (forces) - 重力/阻力/合力向量分解，仅用于显示
//! - 状态管理 (state) - 雨滴集合的归一化运动学状态
//! - 引擎核心 (engine) - 半隐式欧拉推进、边界回绕与循环回收
//!
//! # 两套阻力模型
//!
//! 引擎推进使用一维（仅垂直）约化形式 `a_y = g(1 − (v_y/V_t)²)`，
//! 风被建模为无阻力的恒定水平速度；力模型使用瞬时合速度计算阻力，
//! 仅供向量可视化。二者在同一速度下的垂直分量数值一致，但有意
//! 不统一：前者是模拟权威，后者只是显示。

pub mod derived;
pub mod engine;
pub mod forces;
pub mod scalar;
pub mod state;

pub use derived::DerivedQuantities;
pub use engine::{EngineStats, SimulationEngine, TickClock, VectorSample};
pub use forces::ForceModel;
pub use scalar::{
    analytic_fall_time, cross_section_area, drop_mass, incidence_angle_deg, resultant_speed,
    terminal_velocity,
};
pub use state::{DropEnsemble, DropState};

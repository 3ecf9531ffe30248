// crates/rd_physics/src/engine/mod.rs

//! 引擎核心
//!
//! - [`integrator`]: 半隐式欧拉集合推进器 [`SimulationEngine`]
//! - [`clock`]: 帧驱动时间步钳制 [`TickClock`]

pub mod clock;
pub mod integrator;

pub use clock::TickClock;
pub use integrator::{EngineStats, SimulationEngine, VectorSample};

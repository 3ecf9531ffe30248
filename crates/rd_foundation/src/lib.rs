// crates/rd_foundation/src/lib.rs

//! RainDrop 基础层
//!
//! 提供整个项目的基础抽象：安全浮点运算和验证宏。
//!
//! # 模块概览
//!
//! - [`float`]: 安全浮点运算（防 NaN/Inf 污染）与 Kahan 补偿求和
//! - [`validation`]: `ensure!` / `require!` 验证宏
//!
//! # 设计原则
//!
//! 1. **零依赖**: 不引入任何第三方 crate
//! 2. **数值安全**: 非有限值在边界处被替换，而不是向下游传播
//! 3. **层次化**: 错误类型在配置、物理、数据各自的 crate 中定义
#![warn(clippy::all)]

pub mod float;
pub mod validation;

pub use float::{clamp_valid, finite_or, is_valid_f64, safe_div, safe_sqrt, KahanSum};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::float::{clamp_valid, finite_or, safe_div, safe_sqrt, KahanSum};
    pub use crate::{ensure, require};
}

// apps/rd_cli/src/commands/mod.rs

//! CLI 子命令

pub mod fetch;
pub mod run;
pub mod stats;
pub mod validate;

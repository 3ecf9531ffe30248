// apps/rd_cli/src/main.rs

//! RainDrop 命令行界面
//!
//! 提供雨滴运动学模拟与降雨数据管线的命令行工具。
//!
//! # 架构层级
//!
//! 本模块属于应用层：只组合 `rd_config`、`rd_physics`、`rd_data`
//! 的公开接口，不包含任何物理或统计逻辑。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// RainDrop 雨滴模拟命令行工具
#[derive(Parser)]
#[command(name = "rd_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "RainDrop kinematics simulator and rain data pipeline", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟
    Run(commands::run::RunArgs),
    /// 降雨统计
    Stats(commands::stats::StatsArgs),
    /// 获取降雨数据
    Fetch(commands::fetch::FetchArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Stats(args) => commands::stats::execute(args),
        Commands::Fetch(args) => commands::fetch::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}

// apps/rd_cli/src/commands/stats.rs

//! 降雨统计命令
//!
//! 加载本地降雨数据文件，按月聚合并打印统计表。
//! 默认只显示最近三个月，`--all` 显示全部月份。

use anyhow::{Context, Result};
use clap::Args;
use rd_config::DataConfig;
use rd_data::{aggregate, load_records, MonthBucket};
use std::path::PathBuf;
use tracing::info;

/// 统计参数
#[derive(Args)]
pub struct StatsArgs {
    /// 数据配置文件路径（缺省使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 降雨数据文件路径（覆盖配置中的路径）
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// 显示全部月份（默认只显示最近三个月）
    #[arg(long)]
    pub all: bool,

    /// 以 JSON 输出汇总
    #[arg(long)]
    pub json: bool,
}

/// 执行统计命令
pub fn execute(args: StatsArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => DataConfig::from_file(path)
            .with_context(|| format!("加载数据配置失败: {}", path.display()))?,
        None => DataConfig::default(),
    };

    let data_path = args.data.unwrap_or(config.data_path);
    info!("加载降雨数据: {}", data_path.display());

    let records = load_records(&data_path)
        .with_context(|| format!("加载降雨数据失败: {}", data_path.display()))?;
    let summary = aggregate(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let buckets: &[MonthBucket] = if args.all {
        &summary.buckets
    } else {
        summary.last_three()
    };

    println!("=== 降雨统计 ===");
    println!(
        "有效记录 {} 条, 总降雨量 {:.1} mm, 日均 {:.2} mm",
        summary.count, summary.total, summary.avg
    );

    for bucket in buckets {
        println!("\n{}:", bucket.label());
        println!("  总量:   {:.1} mm", bucket.total);
        println!("  日均:   {:.2} mm", bucket.avg_per_day);
        println!("  雨天:   {} 天, 干天: {} 天", bucket.rainy_days, bucket.dry_days);
        if let Some(max) = &bucket.max_day {
            println!("  最大日: {} ({:.1} mm)", max.date, max.precipitation_mm);
        }
    }

    Ok(())
}

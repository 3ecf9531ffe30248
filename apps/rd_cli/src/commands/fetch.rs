// apps/rd_cli/src/commands/fetch.rs

//! 降雨数据获取命令
//!
//! 从 Open-Meteo 获取日降雨量并持久化到本地文件。本地文件已存在
//! 时默认直接复用，`--refresh` 强制重新获取。

use anyhow::{Context, Result};
use clap::Args;
use rd_config::DataConfig;
use rd_data::{fetch_and_store, load_records, FetchRequest};
use std::path::PathBuf;
use tracing::info;

/// 获取参数
#[derive(Args)]
pub struct FetchArgs {
    /// 数据配置文件路径（缺省使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 纬度 [度]（覆盖配置值）
    #[arg(long)]
    pub latitude: Option<f64>,

    /// 经度 [度]（覆盖配置值）
    #[arg(long)]
    pub longitude: Option<f64>,

    /// 起始日期（YYYY-MM-DD，缺省取三个月前）
    #[arg(long)]
    pub start_date: Option<String>,

    /// 结束日期（YYYY-MM-DD，缺省取今天）
    #[arg(long)]
    pub end_date: Option<String>,

    /// 输出文件路径（覆盖配置中的路径）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 忽略本地文件，强制重新获取
    #[arg(long)]
    pub refresh: bool,
}

/// 执行获取命令
pub fn execute(args: FetchArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => DataConfig::from_file(path)
            .with_context(|| format!("加载数据配置失败: {}", path.display()))?,
        None => DataConfig::default(),
    };

    if let Some(lat) = args.latitude {
        config.latitude = lat;
    }
    if let Some(lon) = args.longitude {
        config.longitude = lon;
    }
    if args.start_date.is_some() {
        config.start_date = args.start_date.clone();
    }
    if args.end_date.is_some() {
        config.end_date = args.end_date.clone();
    }
    config.validate().context("数据配置无效")?;

    let path = args.output.unwrap_or_else(|| config.data_path.clone());

    // 本地数据优先：避免重复请求外部服务
    if !args.refresh && path.exists() {
        let records = load_records(&path)
            .with_context(|| format!("读取本地数据失败: {}", path.display()))?;
        info!(
            "本地数据已存在: {} ({} 条记录)，使用 --refresh 强制重新获取",
            path.display(),
            records.len()
        );
        return Ok(());
    }

    let request = FetchRequest::from_config(&config).context("构造取数请求失败")?;
    info!(
        "获取降雨数据: ({}, {}), {} 到 {}",
        request.latitude, request.longitude, request.start_date, request.end_date
    );

    let records = fetch_and_store(&request, &path).context("获取降雨数据失败")?;
    info!("已保存 {} 条记录到 {}", records.len(), path.display());

    Ok(())
}

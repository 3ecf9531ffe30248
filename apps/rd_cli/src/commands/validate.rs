// apps/rd_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 验证模拟配置与数据配置文件的正确性。

use anyhow::{bail, Result};
use clap::Args;
use rd_config::{DataConfig, SimulationConfig};
use std::path::PathBuf;
use tracing::{error, warn};

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 模拟配置文件路径
    #[arg(short, long)]
    pub simulation: Option<PathBuf>,

    /// 数据配置文件路径
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    let mut result = ValidationResult::default();

    if let Some(path) = &args.simulation {
        validate_simulation(path, &mut result)?;
    }

    if let Some(path) = &args.data {
        validate_data(path, &mut result)?;
    }

    if args.simulation.is_none() && args.data.is_none() {
        println!("用法: rd_cli validate --simulation <配置文件> [--data <数据配置文件>]");
        println!("      rd_cli validate --data <数据配置文件>");
        return Ok(());
    }

    print_validation_result(&result, args.strict)
}

fn validate_simulation(path: &PathBuf, result: &mut ValidationResult) -> Result<()> {
    println!("\n检查模拟配置: {}", path.display());

    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return Ok(());
    }

    let config = match SimulationConfig::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("模拟配置无效: {}", e));
            return Ok(());
        }
    };

    // 硬边界之内的软性提示（UI 建议调节范围）
    if config.wind_speed > 20.0 {
        result.add_warning(format!(
            "风速 {} m/s 超出建议范围 [0, 20]",
            config.wind_speed
        ));
    }
    if config.drop_diameter_mm < 1.0 || config.drop_diameter_mm > 5.0 {
        result.add_warning(format!(
            "雨滴直径 {} mm 超出建议范围 [1, 5]",
            config.drop_diameter_mm
        ));
    }
    if config.fall_height_m < 100.0 || config.fall_height_m > 1000.0 {
        result.add_warning(format!(
            "下落高度 {} m 超出建议范围 [100, 1000]",
            config.fall_height_m
        ));
    }
    if (config.gravity - 9.81).abs() > 1.0 {
        result.add_warning(format!("重力加速度 {} 偏离地球标准值较大", config.gravity));
    }

    println!("  ✓ 模拟配置格式有效");
    Ok(())
}

fn validate_data(path: &PathBuf, result: &mut ValidationResult) -> Result<()> {
    println!("\n检查数据配置: {}", path.display());

    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return Ok(());
    }

    let config = match DataConfig::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("数据配置无效: {}", e));
            return Ok(());
        }
    };

    // 日期格式在取数层才强制，这里提前提示
    for (name, value) in [("start_date", &config.start_date), ("end_date", &config.end_date)] {
        if let Some(s) = value {
            if chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
                result.add_error(format!("{} 不是有效的 ISO 日期: {}", name, s));
            }
        }
    }

    if !config.data_path.exists() {
        result.add_warning(format!(
            "降雨数据文件不存在: {}（先运行 rd_cli fetch）",
            config.data_path.display()
        ));
    }

    println!("  ✓ 数据配置格式有效");
    Ok(())
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    if result.is_ok(strict) {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

// apps/rd_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 以固定步长无头运行雨滴模拟，周期性输出集合统计，
//! 结束时对照解析下落时间给出汇总。

use anyhow::{Context, Result};
use clap::Args;
use rd_config::SimulationConfig;
use rd_physics::{analytic_fall_time, SimulationEngine};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径（缺省使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 模拟结束时间 [秒]
    #[arg(short = 't', long, default_value = "60.0")]
    pub end_time: f64,

    /// 时间步长 [秒]
    #[arg(long, default_value = "0.02")]
    pub dt: f64,

    /// 统计输出间隔 [秒]
    #[arg(long, default_value = "5.0")]
    pub output_interval: f64,

    /// 水平风速 [m/s]（覆盖配置值）
    #[arg(short, long)]
    pub wind: Option<f64>,

    /// 雨滴直径 [mm]（覆盖配置值）
    #[arg(short = 'd', long)]
    pub diameter: Option<f64>,

    /// 随机种子（可重现运行）
    #[arg(long)]
    pub seed: Option<u64>,

    /// 渲染面宽高比
    #[arg(long, default_value = "1.5")]
    pub aspect_ratio: f64,

    /// 向量采样步长（每 N 滴取一个样本，0 关闭采样输出）
    #[arg(long, default_value = "0")]
    pub vector_stride: usize,

    /// 采样输出显示力向量而非速度向量
    #[arg(long)]
    pub force_vectors: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== RainDrop 模拟启动 ===");

    // 构建配置
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(wind) = args.wind {
        config.wind_speed = wind;
    }
    if let Some(diameter) = args.diameter {
        config.drop_diameter_mm = diameter;
    }
    if args.force_vectors {
        config.show_force_vectors = true;
    }

    info!(
        "配置: 风速={} m/s, 直径={} mm, 高度={} m, 雨滴数={}",
        config.wind_speed, config.drop_diameter_mm, config.fall_height_m, config.drop_count
    );

    // 构建引擎
    let mut engine = match args.seed {
        Some(seed) => SimulationEngine::with_seed(config, args.aspect_ratio, seed),
        None => SimulationEngine::new(config, args.aspect_ratio),
    }
    .context("构建模拟引擎失败")?;

    let derived = *engine.derived();
    info!(
        "派生量: 质量={:.3e} kg, 截面积={:.3e} m², 终端速度={:.2} m/s",
        derived.mass, derived.area, derived.terminal_velocity
    );

    // 模拟循环
    let start = Instant::now();
    let mut last_output_time = 0.0;

    info!(
        "开始模拟: 结束时间={} s, 时间步长={} s",
        args.end_time, args.dt
    );

    while engine.time() < args.end_time {
        engine.tick(args.dt);

        if engine.time() - last_output_time >= args.output_interval {
            let stats = engine.stats();
            info!(
                "t={:.2} s: 平均 v_y={:.2} m/s, 最大 v_y={:.2} m/s (V_t={:.2} m/s)",
                stats.time, stats.mean_vy, stats.max_vy, stats.terminal_velocity
            );

            if args.vector_stride > 0 {
                for sample in engine.sample_vectors(args.vector_stride) {
                    if engine.config().show_force_vectors {
                        info!(
                            "  样本 ({:.2}, {:.2}): 重力=({:.2e}, {:.2e}) N, 阻力=({:.2e}, {:.2e}) N, 合力=({:.2e}, {:.2e}) N",
                            sample.x, sample.y,
                            sample.gravity.x, sample.gravity.y,
                            sample.drag.x, sample.drag.y,
                            sample.net.x, sample.net.y
                        );
                    } else {
                        info!(
                            "  样本 ({:.2}, {:.2}): 速度=({:.2}, {:.2}) m/s, 合速度={:.2} m/s, 入射角={:.1}°",
                            sample.x, sample.y,
                            sample.velocity.x, sample.velocity.y,
                            sample.speed, sample.angle_deg
                        );
                    }
                }
            }

            last_output_time = engine.time();
        }
    }

    let elapsed = start.elapsed();
    let stats = engine.stats();
    let fall_time = analytic_fall_time(
        engine.config().fall_height_m,
        derived.terminal_velocity,
        engine.config().gravity,
    );

    info!("=== 模拟完成 ===");
    info!("总 tick 数: {}", stats.ticks);
    info!("模拟时间: {:.2} s, 计算时间: {:.2} s", stats.time, elapsed.as_secs_f64());
    info!(
        "解析下落时间: {:.2} s（高度 {} m, 终端速度 {:.2} m/s）",
        fall_time,
        engine.config().fall_height_m,
        derived.terminal_velocity
    );

    Ok(())
}

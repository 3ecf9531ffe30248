// crates/rd_physics/src/state.rs

//! 雨滴集合状态管理
//!
//! 状态以归一化坐标存储：x, y ∈ [0,1)，x 是可见世界宽度的比例，
//! y 是世界高度的比例（0 = 顶部，1 = 地面）。垂直速度以 m/s 存储，
//! 向下为正。
//!
//! 集合在初始化时创建一次，之后只被引擎原地修改；雨滴从不单独
//! 销毁——落地时回收（y 归零、速度归零），集合大小恒定。

use rand::Rng;
use rd_foundation::float::is_valid_f64;
use serde::Serialize;

/// 单个雨滴的运动学状态
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DropState {
    /// 归一化水平位置 ∈ [0,1)
    pub x: f64,
    /// 归一化垂直位置 ∈ [0,1)，0 = 顶部
    pub y: f64,
    /// 垂直速度 [m/s]，向下为正
    pub vy: f64,
}

/// 雨滴集合
///
/// 引擎独占所有权；除测试外不应有其他写入方。
#[derive(Debug, Clone)]
pub struct DropEnsemble {
    /// 雨滴数组，长度在模拟生命周期内恒定
    pub drops: Vec<DropState>,
}

impl DropEnsemble {
    /// 创建 n 个随机位置、零初速的雨滴
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let drops = (0..n)
            .map(|_| DropState {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                vy: 0.0,
            })
            .collect();
        Self { drops }
    }

    /// 雨滴数量
    pub fn len(&self) -> usize {
        self.drops.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// 只读切片
    pub fn as_slice(&self) -> &[DropState] {
        &self.drops
    }

    /// 检查不变量：位置在 [0,1) 内且所有分量有限
    pub fn invariants_hold(&self) -> bool {
        self.drops.iter().all(|d| {
            is_valid_f64(d.x)
                && is_valid_f64(d.y)
                && is_valid_f64(d.vy)
                && (0.0..1.0).contains(&d.x)
                && (0.0..1.0).contains(&d.y)
        })
    }
}

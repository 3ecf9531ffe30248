// crates/rd_foundation/src/float.rs

//! 安全浮点运算与数值常量
//!
//! 模拟引擎的硬性要求是 NaN/Inf 永远不能写入持久状态：一旦某个雨滴的
//! 速度被污染，后续所有 tick 都会被破坏。本模块提供在边界处替换
//! 非有限值的工具函数，以及用于降雨量累加的 Kahan 补偿求和。

// ============================================================================
// 数值常量
// ============================================================================

/// 浮点数相等性比较的默认容差
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// 安全除法的最小分母阈值
pub const SAFE_DIV_EPSILON: f64 = 1e-14;

// ============================================================================
// 辅助函数
// ============================================================================

/// 安全除法，分母过小或结果非有限时返回 fallback
#[inline]
pub fn safe_div(a: f64, b: f64, fallback: f64) -> f64 {
    if b.abs() < SAFE_DIV_EPSILON {
        fallback
    } else {
        let result = a / b;
        if result.is_finite() {
            result
        } else {
            fallback
        }
    }
}

/// 安全平方根，负数按 0 处理
#[inline]
pub fn safe_sqrt(x: f64) -> f64 {
    x.max(0.0).sqrt()
}

/// 检查浮点数是否有效（有限）
#[inline]
pub fn is_valid_f64(x: f64) -> bool {
    x.is_finite()
}

/// 非有限值替换为 fallback
#[inline]
pub fn finite_or(x: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        fallback
    }
}

/// 限制值到有效范围，非有限值替换为 fallback
#[inline]
pub fn clamp_valid(x: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if x.is_finite() {
        x.clamp(min, max)
    } else {
        fallback
    }
}

// ============================================================================
// Kahan 求和算法
// ============================================================================

/// Kahan 求和器
///
/// 使用补偿项跟踪累加过程中丢失的低位精度。降雨统计需要累加大量
/// 较小的日降雨量，普通求和在长序列上会积累可观测的误差。
///
/// # 示例
///
/// ```
/// use rd_foundation::float::KahanSum;
///
/// let mut sum = KahanSum::new();
/// for _ in 0..10000 {
///     sum.add(0.1);
/// }
/// assert!((sum.value() - 1000.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KahanSum {
    /// 累加和
    sum: f64,
    /// 补偿项（低位精度损失）
    compensation: f64,
}

impl KahanSum {
    /// 创建新的求和器
    #[inline]
    pub fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// 添加一个值
    #[inline]
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        // (t - sum) 是 y 的高位部分，减去 y 得到丢失的低位（取反存储）
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// 获取当前求和值
    #[inline]
    pub fn value(&self) -> f64 {
        self.sum
    }

    /// 从迭代器求和
    pub fn sum_iter<I: IntoIterator<Item = f64>>(iter: I) -> f64 {
        let mut kahan = Self::new();
        for v in iter {
            kahan.add(v);
        }
        kahan.value()
    }
}

// ============================================================================
// 测试
// ============================================================================

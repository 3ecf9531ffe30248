// crates/rd_physics/src/engine/clock.rs

//! 帧驱动时间步钳制
//!
//! 模拟由渲染回调按帧驱动，真实帧间隔会因系统负载抖动。
//! [`TickClock`] 把墙钟时间差转换为钳制后的 dt：第一帧返回 0，
//! 之后返回 min(测量值, max_dt)，负值或非有限值按 0 处理。

use rd_foundation::float::clamp_valid;

/// 时间步钳制器
///
/// 以秒为单位的单调时间戳由调用方提供，便于测试。
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    /// 上一帧时间戳 [s]
    last: Option<f64>,
    /// 单帧最大时间步长 [s]
    max_dt: f64,
}

impl TickClock {
    /// 创建钳制器
    pub fn new(max_dt: f64) -> Self {
        Self { last: None, max_dt }
    }

    /// 记录当前时间戳并返回钳制后的 dt
    pub fn tick(&mut self, now_seconds: f64) -> f64 {
        let dt = match self.last {
            Some(last) => clamp_valid(now_seconds - last, 0.0, self.max_dt, 0.0),
            None => 0.0,
        };
        self.last = Some(now_seconds);
        dt
    }

    /// 重置（下一次 tick 返回 0）
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = TickClock::new(0.05);
        assert!(clock.tick(100.0).abs() < 1e-15);
    }

    #[test]
    fn test_normal_frame() {
        let mut clock = TickClock::new(0.05);
        clock.tick(0.0);
        let dt = clock.tick(0.016);
        assert!((dt - 0.016).abs() < 1e-12);
    }

    #[test]
    fn test_hitch_clamped() {
        // 帧率骤降时 dt 被钳到 max_dt
        let mut clock = TickClock::new(0.05);
        clock.tick(0.0);
        let dt = clock.tick(1.0);
        assert!((dt - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = TickClock::new(0.05);
        clock.tick(10.0);
        assert!(clock.tick(9.0).abs() < 1e-15);
    }

    #[test]
    fn test_reset() {
        let mut clock = TickClock::new(0.05);
        clock.tick(0.0);
        clock.reset();
        assert!(clock.tick(5.0).abs() < 1e-15);
    }
}

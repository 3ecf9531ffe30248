// crates/rd_foundation/src/validation.rs

//! 运行时验证宏
//!
//! 提供 `ensure!` 和 `require!` 两个轻量宏，用于在返回 `Result`
//! 的函数中做前置条件检查。错误类型由调用方给出，宏本身不依赖
//! 任何具体错误类型。
//!
//! # 示例
//!
//! ```
//! use rd_foundation::{ensure, require};
//!
//! fn half(x: Option<f64>) -> Result<f64, String> {
//!     let v = require!(x, "x 缺失".to_string());
//!     ensure!(v.is_finite(), "x 必须有限".to_string());
//!     Ok(v / 2.0)
//! }
//!
//! assert_eq!(half(Some(4.0)), Ok(2.0));
//! assert!(half(None).is_err());
//! ```

/// 条件不满足时提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// 解包 `Option`，为 `None` 时提前返回错误
#[macro_export]
macro_rules! require {
    ($opt:expr, $err:expr) => {
        match $opt {
            Some(v) => v,
            None => return Err($err),
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_ensure_macro() {
        fn check(value: i32) -> Result<(), &'static str> {
            crate::ensure!(value > 0, "必须为正");
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(check(-1).is_err());
    }

    #[test]
    fn test_require_macro() {
        fn get_value(opt: Option<i32>) -> Result<i32, &'static str> {
            let v = crate::require!(opt, "缺失");
            Ok(v)
        }

        assert_eq!(get_value(Some(42)).unwrap(), 42);
        assert!(get_value(None).is_err());
    }
}

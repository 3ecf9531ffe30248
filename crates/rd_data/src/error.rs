// crates/rd_data/src/error.rs

//! 数据层错误类型

use std::path::PathBuf;

/// 数据层错误
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 文件不存在
    #[error("数据文件不存在: {0}")]
    FileNotFound(PathBuf),

    /// 序列化/反序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 远程获取失败（可恢复，调用方可重试或回退到本地数据）
    #[error("数据获取失败: {0}")]
    Fetch(String),

    /// 响应格式畸形（数组缺失或长度不匹配）
    #[error("响应数据畸形: {0}")]
    Malformed(String),

    /// 日期无法解析
    #[error("无效日期: {0}")]
    InvalidDate(String),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// crates/rd_data/src/store.rs

//! 降雨数据本地存储
//!
//! JSON 数组文件，取数层写入、统计消费方读取。写入方与读取方
//! 共享同一文件，因此写入必须对读取方原子：先写临时文件再重命名，
//! 读取方永远不会观察到写了一半的记录集。

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::DataError;
use crate::record::RainRecord;

/// 从文件加载记录
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RainRecord>, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let records: Vec<RainRecord> = serde_json::from_str(&content)?;
    debug!("从 {} 加载 {} 条记录", path.display(), records.len());
    Ok(records)
}

/// 原子保存记录
///
/// 写入同目录下的临时文件后重命名到目标路径。rename 在同一文件系统
/// 上是原子的，并发读取方要么看到旧文件要么看到新文件。
pub fn save_records<P: AsRef<Path>>(path: P, records: &[RainRecord]) -> Result<(), DataError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(records)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp_path = Path::new(&tmp);

    fs::write(tmp_path, content)?;
    fs::rename(tmp_path, path)?;

    debug!("保存 {} 条记录到 {}", records.len(), path.display());
    Ok(())
}

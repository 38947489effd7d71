use std::path::{Path, PathBuf};

use thiserror::Error;

/// 检查点读写错误
#[derive(Error, Debug)]
pub enum CheckpointError {
    #[error("读写检查点{path:?}失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 检查点文件不存在
    #[error("检查点不存在: {0:?}")]
    NotFound(PathBuf),

    /// 魔数/版本不符、无法解码、缺少必需的键，或内容与当前网络不匹配
    #[error("检查点{path:?}已损坏: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("检查点编码失败: {0}")]
    Encode(#[from] bincode::Error),
}

impl CheckpointError {
    pub(crate) fn corrupt(path: &Path, reason: impl ToString) -> Self {
        Self::Corrupt {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ==========================================
// 制作团队排班系统 - 配置错误类型
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(PathBuf),

    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("配置值无效 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("配置序列化失败: {0}")]
    SnapshotError(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// 制作团队排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 存储: JSON 文件 (缺省键取默认值)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::roster_config::RosterConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    source: Option<PathBuf>,
    config: RosterConfig,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self {
            source: None,
            config: RosterConfig::default(),
        }
    }

    /// 从已有配置创建 (校验后)
    pub fn from_config(config: RosterConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            source: None,
            config,
        })
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径
    ///
    /// # 返回
    /// - Ok(ConfigManager): 已校验的配置
    /// - Err: 文件不存在 / 格式错误 / 值无效
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config: RosterConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path.display(), venues = ?config.venues, "配置加载完成");
        Ok(Self {
            source: Some(path.to_path_buf()),
            config,
        })
    }

    /// 有路径则加载, 无路径则使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                debug!("未指定配置文件, 使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 共享给引擎的只读配置
    pub fn shared(&self) -> Arc<RosterConfig> {
        Arc::new(self.config.clone())
    }

    /// 获取生效配置的快照 (JSON 格式)
    ///
    /// # 用途
    /// - 随排班结果一起导出, 保证结果可复现
    pub fn config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}

// ==========================================
// 制作团队排班系统 - 配置层
// ==========================================
// 职责: 排班参数管理
// 存储: JSON 配置文件
// ==========================================

pub mod config_manager;
pub mod error;
pub mod roster_config;

// 重导出核心配置管理器
pub use config_manager::ConfigManager;
pub use error::{ConfigError, ConfigResult};
pub use roster_config::{config_keys, RosterConfig};

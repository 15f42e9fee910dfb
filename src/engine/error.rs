// ==========================================
// 制作团队排班系统 - 引擎错误类型
// ==========================================
// 红线: 查找失败必须显式报错, 不得默认为 0 或不可用
// ==========================================

use crate::config::ConfigError;
use chrono::NaiveDate;
use thiserror::Error;

/// 查找错误 (致命, 中止整次运行)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("技能表中不存在人员: {name}")]
    PersonNotFound { name: String },

    #[error("技能表中不存在技能列: {column}")]
    SkillColumnNotFound { column: String },

    #[error("可用性表中不存在日期列: {date}")]
    DateNotFound { date: NaiveDate },
}

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("日期列无法解析: {header}（期望 YYYY-MM-DD）")]
    MalformedDateHeader { header: String },

    #[error("服务日历中日期重复: {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("配置无效: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

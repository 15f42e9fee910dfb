// ==========================================
// 制作团队排班系统 - 核心库
// ==========================================
// 职责: 按技能等级 + 出勤表, 为周末聚会分配制作岗位
// 流程: 导入 → 日历 → 排班引擎 → 渲染输出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排班规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 渲染层 - 视图与输出
pub mod render;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DayCategory, SelectionRule, SkillLevel, VacancyReason};

// 领域实体
pub use domain::{
    Assignment, AssignmentLog, AvailabilityTable, PersonSkills, RoleSlot, ScheduleState,
    SkillColumn, SkillTable, UnfilledSlot,
};

// 引擎
pub use engine::{
    AssignmentEngine, AvailabilityIndex, EngineError, RosterOutcome, ServiceCalendar,
    SkillRegistry,
};

// 配置
pub use config::{ConfigManager, RosterConfig};

// 导入
pub use importer::RosterImporter;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "制作团队排班系统";

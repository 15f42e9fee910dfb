// ==========================================
// 制作团队排班系统 - 引擎层
// ==========================================
// 职责: 排班决策规则
// 红线: 引擎不读写文件, 所有空缺必须输出 reason
// ==========================================

pub mod assignment;
pub mod availability;
pub mod calendar;
pub mod eligibility;
pub mod error;
pub mod fairness;
pub mod skill_registry;

// 重导出核心引擎
pub use assignment::{AssignmentEngine, RosterOutcome, ServiceContext};
pub use availability::AvailabilityIndex;
pub use calendar::{parse_date_header, ServiceCalendar, DATE_HEADER_FORMAT};
pub use eligibility::EligibilityFilter;
pub use error::{EngineError, EngineResult, LookupError};
pub use fairness::FairnessTracker;
pub use skill_registry::SkillRegistry;

// ==========================================
// 制作团队排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件访问逻辑, 不含选人逻辑
// ==========================================

pub mod assignment;
pub mod schedule;
pub mod skill;
pub mod types;

// 重导出核心类型
pub use assignment::{Assignment, AssignmentGroup, AssignmentLog};
pub use schedule::{RoleSlot, ScheduleEntry, ScheduleState, ServiceKey, UnfilledSlot};
pub use skill::{AvailabilityRow, AvailabilityTable, PersonSkills, SkillColumn, SkillTable};
pub use types::{
    assistant_role, main_role, DayCategory, SelectionRule, SkillLevel, VacancyReason,
    ASSISTANT_ROLE, DIRECTOR_ROLE,
};

// ==========================================
// 制作团队排班系统 - 领域类型定义
// ==========================================
// 红线: 技能等级为小整数, 数值越大越熟练
// ==========================================

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 技能等级 (0 = 不具备, 1 = 可担任助理, 2 = 可担任主岗)
pub type SkillLevel = u8;

/// 可担任主岗 (Main / Director)
pub const LEVEL_LEAD: SkillLevel = 2;

/// 可担任助理 (Assistant)
pub const LEVEL_ASSIST: SkillLevel = 1;

/// 总监岗位名称
pub const DIRECTOR_ROLE: &str = "Director";

/// 周六跨岗位助理名称
pub const ASSISTANT_ROLE: &str = "Assistant";

/// 周日主岗名称, 如 "Sound Main"
pub fn main_role(role: &str) -> String {
    format!("{} Main", role)
}

/// 周日助理名称, 如 "Sound Assistant"
pub fn assistant_role(role: &str) -> String {
    format!("{} Assistant", role)
}

// ==========================================
// 服务日类别 (Day Category)
// ==========================================
// 非周六/周日的日期不参与排班
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayCategory {
    Saturday, // 周六礼拜
    Sunday,   // 周日礼拜
}

impl DayCategory {
    /// 按星期几分类, 其余工作日返回 None
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Sat => Some(DayCategory::Saturday),
            Weekday::Sun => Some(DayCategory::Sunday),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayCategory::Saturday => "Saturday",
            DayCategory::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 选择规则 (Selection Rule)
// ==========================================
// 每条分配记录都携带命中的规则, 便于审计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionRule {
    SkillThreshold,   // 满足技能门槛 + 负载最低
    DirectorFallback, // 无人达到总监门槛, 降级到全部可用人员
    TrainingRotation, // 周六助理: 按 (总技能, 负载) 升序轮换
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionRule::SkillThreshold => write!(f, "SKILL_THRESHOLD"),
            SelectionRule::DirectorFallback => write!(f, "DIRECTOR_FALLBACK"),
            SelectionRule::TrainingRotation => write!(f, "TRAINING_ROTATION"),
        }
    }
}

// ==========================================
// 空缺原因 (Vacancy Reason)
// ==========================================
// 空缺不是错误, 只记录原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacancyReason {
    NoAvailablePeople,   // 当日无人可用
    NoEligibleCandidate, // 有人可用, 但无人达到技能门槛
    AllEligibleUsed,     // 合格人员均已在本场次担任其他岗位
}

impl fmt::Display for VacancyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VacancyReason::NoAvailablePeople => write!(f, "NO_AVAILABLE_PEOPLE"),
            VacancyReason::NoEligibleCandidate => write!(f, "NO_ELIGIBLE_CANDIDATE"),
            VacancyReason::AllEligibleUsed => write!(f, "ALL_ELIGIBLE_USED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_category_from_weekday() {
        assert_eq!(DayCategory::from_weekday(Weekday::Sat), Some(DayCategory::Saturday));
        assert_eq!(DayCategory::from_weekday(Weekday::Sun), Some(DayCategory::Sunday));
        assert_eq!(DayCategory::from_weekday(Weekday::Fri), None);
        assert_eq!(DayCategory::from_weekday(Weekday::Mon), None);
    }

    #[test]
    fn test_role_titles() {
        assert_eq!(main_role("Sound"), "Sound Main");
        assert_eq!(assistant_role("Resi"), "Resi Assistant");
    }

    #[test]
    fn test_selection_rule_serialization() {
        let json = serde_json::to_string(&SelectionRule::DirectorFallback).unwrap();
        assert_eq!(json, "\"DIRECTOR_FALLBACK\"");
        assert_eq!(SelectionRule::TrainingRotation.to_string(), "TRAINING_ROTATION");
    }
}

// ==========================================
// 制作团队排班系统 - 场次上下文
// ==========================================
// 职责: 单个 (日期, 场地) 的已用人员集合
// 红线: 同一场次内一人只担任一个岗位; 上下文结束即丢弃
// ==========================================

use crate::domain::schedule::{RoleSlot, ScheduleState};
use crate::domain::types::DayCategory;
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub day: DayCategory,
    pub venue: String,
    pub date: NaiveDate,
    used: HashSet<String>,
}

impl ServiceContext {
    /// 打开场次, 以排班表中已在岗的人员 (总监) 作为初始已用集合
    pub fn open(schedule: &ScheduleState, day: DayCategory, venue: &str, date: NaiveDate) -> Self {
        Self {
            day,
            venue: venue.to_string(),
            date,
            used: schedule.occupants(day, venue, date),
        }
    }

    pub fn is_used(&self, person: &str) -> bool {
        self.used.contains(person)
    }

    /// 占用; 已被占用时返回 false
    pub fn claim(&mut self, person: &str) -> bool {
        self.used.insert(person.to_string())
    }

    pub fn slot(&self, role: &str) -> RoleSlot {
        RoleSlot::new(self.day, &self.venue, self.date, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_seeds_with_existing_occupants() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        let mut schedule = ScheduleState::new();
        schedule.assign(&RoleSlot::new(DayCategory::Sunday, "Tygerberg", date, "Director"), "Bea");

        let mut ctx = ServiceContext::open(&schedule, DayCategory::Sunday, "Tygerberg", date);
        assert!(ctx.is_used("Bea"));
        assert!(!ctx.is_used("Anna"));

        assert!(ctx.claim("Anna"));
        assert!(!ctx.claim("Anna"));
        assert!(ctx.is_used("Anna"));
        assert_eq!(ctx.slot("Sound Main").venue, "Tygerberg");
    }
}

// ==========================================
// 制作团队排班系统 - 排班表领域模型
// ==========================================
// 职责: 按 (服务日, 场地, 日期, 岗位) 存放已分配人员
// 红线: 纯数据容器, 不含选人逻辑
// ==========================================

use crate::domain::types::{DayCategory, VacancyReason};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

// ==========================================
// ServiceKey - 服务场次 (服务日类别 + 场地)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceKey {
    pub day: DayCategory,
    pub venue: String,
}

impl ServiceKey {
    pub fn new(day: DayCategory, venue: &str) -> Self {
        Self {
            day,
            venue: venue.to_string(),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.venue, self.day)
    }
}

// ==========================================
// RoleSlot - 岗位槽位 (日期, 场地, 岗位)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSlot {
    pub day: DayCategory,
    pub venue: String,
    pub date: NaiveDate,
    pub role: String,
}

impl RoleSlot {
    pub fn new(day: DayCategory, venue: &str, date: NaiveDate, role: &str) -> Self {
        Self {
            day,
            venue: venue.to_string(),
            date,
            role: role.to_string(),
        }
    }
}

impl fmt::Display for RoleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.date, self.day, self.venue, self.role)
    }
}

/// 未能填充的槽位及原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledSlot {
    pub slot: RoleSlot,
    pub reason: VacancyReason,
}

/// 排班表扁平记录 (用于导出)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: DayCategory,
    pub venue: String,
    pub date: NaiveDate,
    pub role: String,
    pub person: String,
}

type DayRoster = BTreeMap<String, String>; // role -> person

// ==========================================
// ScheduleState - 排班表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleState {
    services: BTreeMap<ServiceKey, BTreeMap<NaiveDate, DayRoster>>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为服务场次开出全部日期 (每个日期初始为空)
    pub fn open_service(&mut self, key: ServiceKey, dates: &[NaiveDate]) {
        let days = self.services.entry(key).or_default();
        for date in dates {
            days.entry(*date).or_default();
        }
    }

    /// 写入槽位
    ///
    /// # 返回
    /// 槽位原有人员 (正常流程下应为 None)
    pub fn assign(&mut self, slot: &RoleSlot, person: &str) -> Option<String> {
        self.services
            .entry(ServiceKey::new(slot.day, &slot.venue))
            .or_default()
            .entry(slot.date)
            .or_default()
            .insert(slot.role.clone(), person.to_string())
    }

    /// 按 (服务日, 场地, 日期, 岗位) 查询, 空缺返回 None
    pub fn get(&self, day: DayCategory, venue: &str, date: NaiveDate, role: &str) -> Option<&str> {
        self.services
            .get(&ServiceKey::new(day, venue))
            .and_then(|days| days.get(&date))
            .and_then(|roster| roster.get(role))
            .map(String::as_str)
    }

    pub fn slot(&self, slot: &RoleSlot) -> Option<&str> {
        self.get(slot.day, &slot.venue, slot.date, &slot.role)
    }

    /// 某场次某日已在岗的全部人员
    pub fn occupants(&self, day: DayCategory, venue: &str, date: NaiveDate) -> HashSet<String> {
        self.services
            .get(&ServiceKey::new(day, venue))
            .and_then(|days| days.get(&date))
            .map(|roster| roster.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceKey> {
        self.services.keys()
    }

    /// 某场次开出的日期 (升序)
    pub fn dates(&self, key: &ServiceKey) -> Vec<NaiveDate> {
        self.services
            .get(key)
            .map(|days| days.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn filled_count(&self) -> usize {
        self.services
            .values()
            .flat_map(|days| days.values())
            .map(|roster| roster.len())
            .sum()
    }

    /// 扁平化输出, 顺序稳定 (场次, 日期, 岗位)
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        let mut out = Vec::with_capacity(self.filled_count());
        for (key, days) in &self.services {
            for (date, roster) in days {
                for (role, person) in roster {
                    out.push(ScheduleEntry {
                        day: key.day,
                        venue: key.venue.clone(),
                        date: *date,
                        role: role.clone(),
                        person: person.clone(),
                    });
                }
            }
        }
        out
    }
}

// ==========================================
// 制作团队排班系统 - 分配日志领域模型
// ==========================================
// 红线: 每次成功分配必须且只能记录一次
// 用途: 审计追踪, 汇总统计 (汇总均由日志派生, 不冗余存储)
// ==========================================

use crate::domain::types::{DayCategory, SelectionRule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Assignment - 分配事实 (不可变)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub person: String,      // 人员姓名
    pub venue: String,       // 场地
    pub role: String,        // 岗位名称 (如 "Sound Main")
    pub day: DayCategory,    // 服务日类别
    pub date: NaiveDate,     // 日期
    pub rule: SelectionRule, // 命中的选择规则
}

// ==========================================
// AssignmentGroup - 分组计数 (Day, Name, Venue, Role)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentGroup {
    pub day: DayCategory,
    pub person: String,
    pub venue: String,
    pub role: String,
    pub count: usize,
}

// ==========================================
// AssignmentLog - 分配日志 (按分配顺序)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentLog {
    entries: Vec<Assignment>,
}

impl AssignmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, assignment: Assignment) {
        self.entries.push(assignment);
    }

    pub fn entries(&self) -> &[Assignment] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某人在本次运行中的分配次数
    pub fn count_for(&self, person: &str) -> usize {
        self.entries.iter().filter(|a| a.person == person).count()
    }

    // ==========================================
    // 汇总视图 (供渲染层使用)
    // ==========================================

    /// 按人员汇总总次数
    pub fn totals_by_person(&self) -> BTreeMap<String, usize> {
        let mut totals = BTreeMap::new();
        for a in &self.entries {
            *totals.entry(a.person.clone()).or_insert(0) += 1;
        }
        totals
    }

    /// 按 (人员, 场地) 汇总
    pub fn counts_by_person_venue(&self) -> BTreeMap<(String, String), usize> {
        let mut counts = BTreeMap::new();
        for a in &self.entries {
            *counts
                .entry((a.person.clone(), a.venue.clone()))
                .or_insert(0) += 1;
        }
        counts
    }

    /// 按 (人员, 服务日类别) 汇总
    pub fn counts_by_person_day(&self) -> BTreeMap<(String, DayCategory), usize> {
        let mut counts = BTreeMap::new();
        for a in &self.entries {
            *counts.entry((a.person.clone(), a.day)).or_insert(0) += 1;
        }
        counts
    }

    /// 按 (服务日, 人员, 场地, 岗位) 分组计数, 按键升序
    pub fn grouped_counts(&self) -> Vec<AssignmentGroup> {
        let mut grouped: BTreeMap<(DayCategory, String, String, String), usize> = BTreeMap::new();
        for a in &self.entries {
            *grouped
                .entry((a.day, a.person.clone(), a.venue.clone(), a.role.clone()))
                .or_insert(0) += 1;
        }

        grouped
            .into_iter()
            .map(|((day, person, venue, role), count)| AssignmentGroup {
                day,
                person,
                venue,
                role,
                count,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AssignmentLog {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

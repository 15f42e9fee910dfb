// ==========================================
// 制作团队排班系统 - 技能领域模型
// ==========================================
// 职责: 人员技能档案 + 技能表 + 可用性表
// 红线: 表的行顺序即公平排序的并列顺序, 不得重排
// ==========================================

use crate::domain::types::SkillLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// SkillColumn - 技能列
// ==========================================
// (岗位, 场地) 组合, 或独立的总监列
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillColumn {
    Director,
    Role { role: String, venue: String },
}

impl SkillColumn {
    pub fn role(role: &str, venue: &str) -> Self {
        SkillColumn::Role {
            role: role.to_string(),
            venue: venue.to_string(),
        }
    }

    /// 技能表中的列名
    ///
    /// # 参数
    /// - director_column: 总监列名 (可配置)
    ///
    /// # 返回
    /// 总监列返回 director_column, 其余返回 `<Role>_<Venue>`
    pub fn header(&self, director_column: &str) -> String {
        match self {
            SkillColumn::Director => director_column.to_string(),
            SkillColumn::Role { role, venue } => format!("{}_{}", role, venue),
        }
    }
}

impl fmt::Display for SkillColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillColumn::Director => write!(f, "Director"),
            SkillColumn::Role { role, venue } => write!(f, "{}@{}", role, venue),
        }
    }
}

// ==========================================
// PersonSkills - 人员技能档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonSkills {
    pub name: String,
    pub director_level: SkillLevel,
    role_levels: HashMap<(String, String), SkillLevel>, // (role, venue) -> level
}

impl PersonSkills {
    pub fn new(name: impl Into<String>, director_level: SkillLevel) -> Self {
        Self {
            name: name.into(),
            director_level,
            role_levels: HashMap::new(),
        }
    }

    /// 设置某 (岗位, 场地) 的技能等级 (构建器风格)
    pub fn with_role(mut self, role: &str, venue: &str, level: SkillLevel) -> Self {
        self.set_role_level(role, venue, level);
        self
    }

    pub fn set_role_level(&mut self, role: &str, venue: &str, level: SkillLevel) {
        self.role_levels
            .insert((role.to_string(), venue.to_string()), level);
    }

    /// 读取技能等级, 列不存在时返回 None
    pub fn level(&self, column: &SkillColumn) -> Option<SkillLevel> {
        match column {
            SkillColumn::Director => Some(self.director_level),
            SkillColumn::Role { role, venue } => self
                .role_levels
                .get(&(role.clone(), venue.clone()))
                .copied(),
        }
    }
}

// ==========================================
// SkillTable - 技能表 (按导入行顺序)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillTable {
    pub people: Vec<PersonSkills>,
}

impl SkillTable {
    pub fn new(people: Vec<PersonSkills>) -> Self {
        Self { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

// ==========================================
// AvailabilityTable - 可用性表
// ==========================================
// rows[i].flags[j] 对应 dates[j]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityTable {
    pub dates: Vec<NaiveDate>,
    pub rows: Vec<AvailabilityRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRow {
    pub name: String,
    pub flags: Vec<bool>,
}

impl AvailabilityTable {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            rows: Vec::new(),
        }
    }

    /// 追加一行; flags 长度不足的部分视为不可用
    pub fn push_row(&mut self, name: impl Into<String>, mut flags: Vec<bool>) {
        flags.resize(self.dates.len(), false);
        self.rows.push(AvailabilityRow {
            name: name.into(),
            flags,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_column_header() {
        assert_eq!(SkillColumn::Director.header("Director"), "Director");
        assert_eq!(
            SkillColumn::role("Sound", "Tygerberg").header("Director"),
            "Sound_Tygerberg"
        );
        assert_eq!(SkillColumn::role("Resi", "Stellies").to_string(), "Resi@Stellies");
    }

    #[test]
    fn test_person_level_lookup() {
        let person = PersonSkills::new("Anna", 1).with_role("Sound", "Tygerberg", 2);

        assert_eq!(person.level(&SkillColumn::Director), Some(1));
        assert_eq!(person.level(&SkillColumn::role("Sound", "Tygerberg")), Some(2));
        // 未登记的列返回 None, 不默认为 0
        assert_eq!(person.level(&SkillColumn::role("Sound", "Stellies")), None);
    }

    #[test]
    fn test_availability_row_padding() {
        let d1 = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
        let mut table = AvailabilityTable::new(vec![d1, d2]);
        table.push_row("Anna", vec![true]);

        assert_eq!(table.rows[0].flags, vec![true, false]);
        assert_eq!(table.rows[0].name, "Anna");
    }
}

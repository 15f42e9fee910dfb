// ==========================================
// 制作团队排班系统 - 技能查询
// ==========================================
// 职责: 只读查询某人某技能列的等级
// 红线: 人员不存在 → LookupError, 不得视为 0
// ==========================================

use crate::domain::skill::{PersonSkills, SkillColumn, SkillTable};
use crate::domain::types::SkillLevel;
use crate::engine::error::LookupError;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// SkillRegistry - 技能登记表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    people: HashMap<String, PersonSkills>,
    order: Vec<String>,
}

impl SkillRegistry {
    /// 从技能表构建; 同名重复行只保留第一行
    pub fn from_table(table: SkillTable) -> Self {
        let mut people = HashMap::with_capacity(table.people.len());
        let mut order = Vec::with_capacity(table.people.len());

        for person in table.people {
            if people.contains_key(&person.name) {
                warn!(name = %person.name, "技能表存在重复姓名, 保留第一行");
                continue;
            }
            order.push(person.name.clone());
            people.insert(person.name.clone(), person);
        }

        Self { people, order }
    }

    /// 查询技能等级
    ///
    /// # 参数
    /// - person: 人员姓名
    /// - column: 技能列
    ///
    /// # 返回
    /// - Ok(level)
    /// - Err(PersonNotFound | SkillColumnNotFound)
    pub fn level(&self, person: &str, column: &SkillColumn) -> Result<SkillLevel, LookupError> {
        let skills = self
            .people
            .get(person)
            .ok_or_else(|| LookupError::PersonNotFound {
                name: person.to_string(),
            })?;

        skills
            .level(column)
            .ok_or_else(|| LookupError::SkillColumnNotFound {
                column: column.to_string(),
            })
    }

    /// 多个技能列等级之和
    pub fn total_level(&self, person: &str, columns: &[SkillColumn]) -> Result<u32, LookupError> {
        columns.iter().try_fold(0u32, |acc, column| {
            Ok(acc + u32::from(self.level(person, column)?))
        })
    }

    pub fn contains(&self, person: &str) -> bool {
        self.people.contains_key(person)
    }

    /// 全部人员 (按技能表行顺序)
    pub fn people(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SkillRegistry {
        SkillRegistry::from_table(SkillTable::new(vec![
            PersonSkills::new("Anna", 0)
                .with_role("Sound", "Tygerberg", 2)
                .with_role("Lights", "Tygerberg", 1),
            PersonSkills::new("Bea", 2).with_role("Sound", "Tygerberg", 1),
            PersonSkills::new("Anna", 2),
        ]))
    }

    #[test]
    fn test_level_lookup() {
        let registry = registry();
        assert_eq!(registry.level("Anna", &SkillColumn::role("Sound", "Tygerberg")), Ok(2));
        assert_eq!(registry.level("Bea", &SkillColumn::Director), Ok(2));
    }

    #[test]
    fn test_missing_person_is_explicit_error() {
        let registry = registry();
        assert_eq!(
            registry.level("Zed", &SkillColumn::Director),
            Err(LookupError::PersonNotFound { name: "Zed".to_string() })
        );
    }

    #[test]
    fn test_missing_column_is_explicit_error() {
        let registry = registry();
        let result = registry.level("Bea", &SkillColumn::role("Lights", "Stellies"));
        assert!(matches!(result, Err(LookupError::SkillColumnNotFound { .. })));
    }

    #[test]
    fn test_duplicate_keeps_first_row() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.level("Anna", &SkillColumn::Director), Ok(0));
        assert_eq!(registry.people().collect::<Vec<_>>(), vec!["Anna", "Bea"]);
    }

    #[test]
    fn test_total_level() {
        let registry = registry();
        let columns = vec![
            SkillColumn::role("Sound", "Tygerberg"),
            SkillColumn::role("Lights", "Tygerberg"),
            SkillColumn::Director,
        ];
        assert_eq!(registry.total_level("Anna", &columns), Ok(3));
    }
}

// ==========================================
// 制作团队排班系统 - 可用性索引
// ==========================================
// 职责: 按日期查询可用人员
// 红线: 返回顺序 = 可用性表行顺序 (公平排序的并列依据)
// ==========================================

use crate::domain::skill::AvailabilityTable;
use crate::engine::error::LookupError;
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// AvailabilityIndex - 可用性索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    by_date: HashMap<NaiveDate, Vec<String>>,
    dates: Vec<NaiveDate>,
    people: Vec<String>,
}

impl AvailabilityIndex {
    /// 从可用性表一次性构建
    pub fn from_table(table: &AvailabilityTable) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<String>> = HashMap::with_capacity(table.dates.len());

        for (col_idx, date) in table.dates.iter().enumerate() {
            let available = table
                .rows
                .iter()
                .filter(|row| row.flags.get(col_idx).copied().unwrap_or(false))
                .map(|row| row.name.clone())
                .collect();
            by_date.insert(*date, available);
        }

        Self {
            by_date,
            dates: table.dates.clone(),
            people: table.rows.iter().map(|r| r.name.clone()).collect(),
        }
    }

    /// 某日全部可用人员
    ///
    /// # 返回
    /// - Ok(&[String]): 可能为空
    /// - Err(DateNotFound): 表中无该日期列
    pub fn available_people(&self, date: NaiveDate) -> Result<&[String], LookupError> {
        self.by_date
            .get(&date)
            .map(Vec::as_slice)
            .ok_or(LookupError::DateNotFound { date })
    }

    /// 日期列 (表中顺序)
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 表中全部人员 (行顺序)
    pub fn people(&self) -> &[String] {
        &self.people
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn test_available_people_preserves_row_order() {
        let mut table = AvailabilityTable::new(vec![date(2), date(3)]);
        table.push_row("Cato", vec![true, false]);
        table.push_row("Anna", vec![true, true]);
        table.push_row("Bea", vec![false, true]);

        let index = AvailabilityIndex::from_table(&table);
        assert_eq!(index.available_people(date(2)).unwrap(), ["Cato", "Anna"]);
        assert_eq!(index.available_people(date(3)).unwrap(), ["Anna", "Bea"]);
        assert_eq!(index.people(), ["Cato", "Anna", "Bea"]);
    }

    #[test]
    fn test_missing_date_is_explicit_error() {
        let table = AvailabilityTable::new(vec![date(2)]);
        let index = AvailabilityIndex::from_table(&table);

        assert!(index.available_people(date(2)).unwrap().is_empty());
        assert_eq!(
            index.available_people(date(9)),
            Err(LookupError::DateNotFound { date: date(9) })
        );
    }
}

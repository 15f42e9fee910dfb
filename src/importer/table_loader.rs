// ==========================================
// 制作团队排班系统 - 表格装载
// ==========================================
// 职责: 原始表格 → 技能表 / 可用性表
// 输入: RawTable + 排班配置
// 输出: SkillTable / AvailabilityTable (保持行顺序)
// 红线: 日期列表头无法解析 → 整体拒绝
// ==========================================

use crate::config::RosterConfig;
use crate::domain::skill::{AvailabilityTable, PersonSkills, SkillColumn, SkillTable};
use crate::domain::types::SkillLevel;
use crate::engine::calendar::parse_date_header;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawTable;
use std::collections::HashSet;
use tracing::{debug, warn};

// ==========================================
// 技能表
// ==========================================

/// 装载技能表
///
/// # 规则
/// - 必须包含姓名列、总监列, 以及配置推导出的全部 `<Role>_<Venue>` 列
/// - 姓名去空白后不得为空或重复
/// - 等级必须为非负整数; 空单元格按 0 处理
pub fn load_skill_table(raw: &RawTable, config: &RosterConfig) -> ImportResult<SkillTable> {
    let name_col = require_column(raw, &config.name_column)?;

    let columns: Vec<(SkillColumn, usize)> = config
        .required_skill_columns()
        .into_iter()
        .map(|column| {
            let header = config.header_of(&column);
            require_column(raw, &header).map(|idx| (column, idx))
        })
        .collect::<ImportResult<_>>()?;

    let mut seen = HashSet::new();
    let mut people = Vec::with_capacity(raw.len());

    for row in 0..raw.len() {
        let display_row = row + 2; // 表头占第 1 行
        let name = checked_name(raw.cell(row, name_col), display_row, &mut seen)?;

        let mut person = PersonSkills::new(name, 0);
        for (column, idx) in &columns {
            let header = config.header_of(column);
            let level = parse_level(raw.cell(row, *idx), display_row, &header)?;
            match column {
                SkillColumn::Director => person.director_level = level,
                SkillColumn::Role { role, venue } => person.set_role_level(role, venue, level),
            }
        }
        people.push(person);
    }

    debug!(people = people.len(), columns = columns.len(), "技能表装载完成");
    Ok(SkillTable::new(people))
}

fn parse_level(value: &str, row: usize, field: &str) -> ImportResult<SkillLevel> {
    if value.is_empty() {
        warn!(row, field, "技能等级为空, 按 0 处理");
        return Ok(0);
    }

    // 电子表格中的整数常以 "2.0" 形式出现
    let normalized = value.strip_suffix(".0").unwrap_or(value);
    normalized
        .parse::<SkillLevel>()
        .map_err(|e| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("无法解析技能等级 '{}': {}", value, e),
        })
}

// ==========================================
// 可用性表
// ==========================================

/// 装载可用性表
///
/// # 规则
/// - 姓名列以外的每一列都必须是 YYYY-MM-DD 日期
/// - 单元格等于肯定标记 (精确匹配) 即为可用, 其余一律不可用
pub fn load_availability_table(
    raw: &RawTable,
    config: &RosterConfig,
) -> ImportResult<AvailabilityTable> {
    let name_col = require_column(raw, &config.name_column)?;

    let mut date_cols = Vec::with_capacity(raw.headers.len().saturating_sub(1));
    let mut dates = Vec::with_capacity(raw.headers.len().saturating_sub(1));
    let mut seen_dates = HashSet::new();
    for (idx, header) in raw.headers.iter().enumerate() {
        if idx == name_col {
            continue;
        }
        let date = parse_date_header(header).map_err(|_| ImportError::DateFormatError {
            field: format!("列 {}", idx + 1),
            value: header.clone(),
        })?;
        // 同一日期出现两列会让该日被排两次
        if !seen_dates.insert(date) {
            return Err(ImportError::DuplicateDateColumn { date });
        }
        date_cols.push(idx);
        dates.push(date);
    }

    let mut table = AvailabilityTable::new(dates);
    let mut seen = HashSet::new();

    for row in 0..raw.len() {
        let name = checked_name(raw.cell(row, name_col), row + 2, &mut seen)?;
        let flags = date_cols
            .iter()
            .map(|&col| raw.cell(row, col) == config.affirmative_marker)
            .collect();
        table.push_row(name, flags);
    }

    debug!(
        people = table.rows.len(),
        dates = table.dates.len(),
        "可用性表装载完成"
    );
    Ok(table)
}

// ==========================================
// 公共辅助
// ==========================================

fn require_column(raw: &RawTable, header: &str) -> ImportResult<usize> {
    raw.column_index(header)
        .ok_or_else(|| ImportError::MissingColumn(header.to_string()))
}

fn checked_name(value: &str, row: usize, seen: &mut HashSet<String>) -> ImportResult<String> {
    let name = value.trim();
    if name.is_empty() {
        return Err(ImportError::EmptyName { row });
    }
    if !seen.insert(name.to_string()) {
        return Err(ImportError::DuplicateName {
            row,
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::file_parser::CsvParser;
    use chrono::NaiveDate;

    fn config() -> RosterConfig {
        RosterConfig {
            venues: vec!["X".to_string()],
            saturday_venue: "X".to_string(),
            roles: vec!["Sound".to_string(), "Lights".to_string()],
            ..RosterConfig::default()
        }
    }

    fn parse(content: &str) -> RawTable {
        CsvParser.parse_str(content).unwrap()
    }

    #[test]
    fn test_load_skill_table() {
        let raw = parse("Name,Sound_X,Lights_X,Director,Notes\nAnna,2,1,0,new\nBea,1,,2,\n");
        let table = load_skill_table(&raw, &config()).unwrap();

        assert_eq!(table.len(), 2);
        let bea = &table.people[1];
        assert_eq!(bea.name, "Bea");
        assert_eq!(bea.director_level, 2);
        assert_eq!(bea.level(&SkillColumn::role("Sound", "X")), Some(1));
        // 空单元格按 0
        assert_eq!(bea.level(&SkillColumn::role("Lights", "X")), Some(0));
    }

    #[test]
    fn test_skill_table_accepts_float_like_integers() {
        let raw = parse("Name,Sound_X,Lights_X,Director\nAnna,2.0,1,0\n");
        let table = load_skill_table(&raw, &config()).unwrap();
        assert_eq!(table.people[0].level(&SkillColumn::role("Sound", "X")), Some(2));
    }

    #[test]
    fn test_skill_table_missing_column() {
        let raw = parse("Name,Sound_X,Director\nAnna,2,0\n");
        let result = load_skill_table(&raw, &config());
        assert!(matches!(result, Err(ImportError::MissingColumn(ref c)) if c == "Lights_X"));
    }

    #[test]
    fn test_skill_table_rejects_bad_level() {
        let raw = parse("Name,Sound_X,Lights_X,Director\nAnna,two,1,0\n");
        let result = load_skill_table(&raw, &config());
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { row: 2, ref field, .. }) if field == "Sound_X"
        ));

        let negative = parse("Name,Sound_X,Lights_X,Director\nAnna,-1,1,0\n");
        assert!(load_skill_table(&negative, &config()).is_err());
    }

    #[test]
    fn test_skill_table_rejects_duplicate_name() {
        let raw = parse("Name,Sound_X,Lights_X,Director\nAnna,2,1,0\n Anna ,1,1,1\n");
        let result = load_skill_table(&raw, &config());
        assert!(matches!(result, Err(ImportError::DuplicateName { row: 3, .. })));
    }

    #[test]
    fn test_load_availability_table() {
        let raw = parse("Name,2025-08-02,2025-08-03\nAnna,Yes,No\nBea,yes,Yes\n");
        let table = load_availability_table(&raw, &config()).unwrap();

        assert_eq!(
            table.dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            ]
        );
        assert_eq!(table.rows[0].flags, vec![true, false]);
        // 标记精确匹配, "yes" 不算可用
        assert_eq!(table.rows[1].flags, vec![false, true]);
    }

    #[test]
    fn test_availability_rejects_malformed_header() {
        let raw = parse("Name,2025-08-02,Comments\nAnna,Yes,\n");
        let result = load_availability_table(&raw, &config());
        assert!(matches!(
            result,
            Err(ImportError::DateFormatError { ref value, .. }) if value == "Comments"
        ));
    }

    #[test]
    fn test_availability_missing_name_column() {
        let raw = parse("Person,2025-08-02\nAnna,Yes\n");
        let result = load_availability_table(&raw, &config());
        assert!(matches!(result, Err(ImportError::MissingColumn(ref c)) if c == "Name"));
    }

    #[test]
    fn test_availability_rejects_repeated_date() {
        let raw = parse("Name,2025-08-03,2025-08-03\nA,Yes,Yes\nB,Yes,Yes\n");
        let result = load_availability_table(&raw, &config());
        assert!(matches!(
            result,
            Err(ImportError::DuplicateDateColumn { date })
                if date == NaiveDate::from_ymd_opt(2025, 8, 3).unwrap()
        ));
    }
}

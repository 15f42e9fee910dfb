// ==========================================
// 制作团队排班系统 - 导入层
// ==========================================
// 职责: 外部表格导入, 生成技能表与可用性表
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod table_loader;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawTable, TableParser, UniversalFileParser};
pub use table_loader::{load_availability_table, load_skill_table};

use crate::config::RosterConfig;
use crate::domain::skill::{AvailabilityTable, SkillTable};
use std::path::Path;
use tracing::info;

// ==========================================
// RosterImporter - 排班数据导入入口
// ==========================================
pub struct RosterImporter<'a> {
    config: &'a RosterConfig,
    parser: UniversalFileParser,
}

impl<'a> RosterImporter<'a> {
    pub fn new(config: &'a RosterConfig) -> Self {
        Self {
            config,
            parser: UniversalFileParser,
        }
    }

    /// 导入技能表文件
    pub fn import_skills<P: AsRef<Path>>(&self, path: P) -> ImportResult<SkillTable> {
        let path = path.as_ref();
        let raw = self.parser.parse(path)?;
        if raw.is_empty() {
            return Err(ImportError::EmptyTable(path.display().to_string()));
        }
        let table = load_skill_table(&raw, self.config)?;
        info!(path = %path.display(), people = table.len(), "技能表导入完成");
        Ok(table)
    }

    /// 导入可用性表文件
    pub fn import_availability<P: AsRef<Path>>(&self, path: P) -> ImportResult<AvailabilityTable> {
        let path = path.as_ref();
        let raw = self.parser.parse(path)?;
        let table = load_availability_table(&raw, self.config)?;
        info!(
            path = %path.display(),
            people = table.rows.len(),
            dates = table.dates.len(),
            "可用性表导入完成"
        );
        Ok(table)
    }
}

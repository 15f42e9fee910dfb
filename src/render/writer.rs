// ==========================================
// 制作团队排班系统 - 结果输出
// ==========================================
// 支持: 每个视图一个 CSV 文件 + 完整 JSON 报告
// ==========================================

use crate::domain::assignment::Assignment;
use crate::domain::schedule::{ScheduleEntry, UnfilledSlot};
use crate::engine::RosterOutcome;
use crate::render::sheets::Sheet;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// 输出错误类型
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("文件写入失败 ({path}): {message}")]
    Io { path: PathBuf, message: String },

    #[error("CSV 写入失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

fn io_error(path: &Path, err: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

// ==========================================
// CsvSheetWriter - CSV 视图输出
// ==========================================
pub struct CsvSheetWriter {
    out_dir: PathBuf,
}

impl CsvSheetWriter {
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// 写出单个视图到 `<out_dir>/<sheet.name>.csv`
    pub fn write_sheet(&self, sheet: &Sheet) -> RenderResult<PathBuf> {
        fs::create_dir_all(&self.out_dir).map_err(|e| io_error(&self.out_dir, e))?;

        let path = self.out_dir.join(format!("{}.csv", sheet.name));
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_path(&path)?;

        writer.write_record(&sheet.headers)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| io_error(&path, e))?;

        Ok(path)
    }

    pub fn write_all(&self, sheets: &[Sheet]) -> RenderResult<Vec<PathBuf>> {
        let paths = sheets
            .iter()
            .map(|s| self.write_sheet(s))
            .collect::<RenderResult<Vec<_>>>()?;
        info!(dir = %self.out_dir.display(), files = paths.len(), "视图已写出");
        Ok(paths)
    }
}

// ==========================================
// JSON 报告
// ==========================================
#[derive(Debug, Serialize)]
pub struct RosterReport<'a> {
    pub version: &'a str,
    pub config: serde_json::Value,
    pub schedule: Vec<ScheduleEntry>,
    pub assignments: &'a [Assignment],
    pub unfilled_slots: &'a [UnfilledSlot],
    pub final_counts: &'a BTreeMap<String, u32>,
}

impl<'a> RosterReport<'a> {
    pub fn new(outcome: &'a RosterOutcome, config_snapshot: &str) -> RenderResult<Self> {
        Ok(Self {
            version: crate::VERSION,
            config: serde_json::from_str(config_snapshot)?,
            schedule: outcome.schedule.entries(),
            assignments: outcome.log.entries(),
            unfilled_slots: &outcome.unfilled_slots,
            final_counts: &outcome.final_counts,
        })
    }
}

/// 写出完整 JSON 报告
pub fn write_json_report<P: AsRef<Path>>(path: P, report: &RosterReport<'_>) -> RenderResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)?;
    info!(path = %path.display(), "JSON 报告已写出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_sheet_creates_directory() {
        let dir = TempDir::new().unwrap();
        let out_dir = dir.path().join("nested").join("out");
        let sheet = Sheet {
            name: "Summary".to_string(),
            headers: vec!["Name".to_string(), "Count".to_string()],
            rows: vec![vec!["Bea".to_string(), "2".to_string()]],
        };

        let path = CsvSheetWriter::new(&out_dir).write_sheet(&sheet).unwrap();

        assert_eq!(path, out_dir.join("Summary.csv"));
        assert_eq!(fs::read_to_string(path).unwrap(), "Name,Count\nBea,2\n");
    }
}

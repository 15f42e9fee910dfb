// ==========================================
// 制作团队排班系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 红线: 保留表头顺序与行顺序 (行顺序影响公平排序的并列结果)
// ==========================================

use crate::engine::DATE_HEADER_FORMAT;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// RawTable - 原始表格 (全部单元格已去空白)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// 读取单元格, 行长度不足时返回空串
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn push_row(&mut self, row: Vec<String>) {
        // 跳过完全空白的行
        if row.iter().all(|v| v.is_empty()) {
            return;
        }
        self.rows.push(row);
    }
}

/// 表格解析接口
pub trait TableParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意读取源解析 (用于内存数据 / 上传内容)
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut table = RawTable {
            headers,
            rows: Vec::new(),
        };

        // 读取所有行
        for result in reader.records() {
            let record = result?;
            table.push_row(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(table)
    }

    pub fn parse_str(&self, content: &str) -> ImportResult<RawTable> {
        self.parse_reader(content.as_bytes())
    }
}

impl TableParser for CsvParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl TableParser for ExcelParser {
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let mut table = RawTable {
            headers: header_row.iter().map(excel_header_text).collect(),
            rows: Vec::new(),
        };

        for data_row in rows {
            table.push_row(
                data_row
                    .iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect(),
            );
        }

        Ok(table)
    }
}

/// 表头单元格文本
///
/// 日期类型的表头 (可用性表的日期列) 转为 YYYY-MM-DD,
/// 否则序列号会被当作字符串而无法解析
fn excel_header_text(cell: &Data) -> String {
    let date = match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    };
    match date {
        Some(d) => d.format(DATE_HEADER_FORMAT).to_string(),
        None => cell.to_string().trim().to_string(),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_table(path),
            "xlsx" | "xls" => ExcelParser.parse_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_csv() -> tempfile::NamedTempFile {
        Builder::new().suffix(".csv").tempfile().unwrap()
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = temp_csv();
        writeln!(temp_file, "Name,Director,Sound_Tygerberg").unwrap();
        writeln!(temp_file, " Anna ,2,1").unwrap();
        writeln!(temp_file, "Bea,0,2").unwrap();

        let table = CsvParser.parse_table(temp_file.path()).unwrap();

        assert_eq!(table.headers, vec!["Name", "Director", "Sound_Tygerberg"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), "Anna");
        assert_eq!(table.cell(1, 2), "2");
        assert_eq!(table.column_index("Director"), Some(1));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let table = CsvParser
            .parse_str("Name,2025-08-02\nAnna,Yes\n,\nBea,No\n")
            .unwrap();

        // 应跳过空行, 并保持原有顺序
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, 0), "Bea");
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let table = CsvParser.parse_str("Name,A,B\nAnna,1\n").unwrap();
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse("people.txt");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ref e)) if e == "txt"));
    }

    #[test]
    fn test_excel_date_header_cells() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        // 45872 = 2025-08-03 (1900 日期系统)
        let serial = Data::DateTime(ExcelDateTime::new(45872.0, ExcelDateTimeType::DateTime, false));
        assert_eq!(excel_header_text(&serial), "2025-08-03");

        let iso = Data::DateTimeIso("2025-08-03".to_string());
        assert_eq!(excel_header_text(&iso), "2025-08-03");

        assert_eq!(excel_header_text(&Data::String(" Name ".to_string())), "Name");
    }
}

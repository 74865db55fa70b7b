// ==========================================
// 教学工作量分配系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx, 指定工作表) / CSV (.csv)
// 输出: 按行顺序的 表头 → 单元格 映射, 附源文件行号
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 单行原始记录: 表头 → 去空白后的单元格文本
pub type RawRecord = HashMap<String, String>;

/// 带行号的原始记录
///
/// row_number 为源文件中的行号 (从 1 起, 表头为第 1 行), 跳过空行后仍指向原位置
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize,
    pub fields: RawRecord,
}

// ==========================================
// FileParser - 文件解析接口
// ==========================================
pub trait FileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

fn is_blank(fields: &RawRecord) -> bool {
    fields.values().all(|v| v.is_empty())
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 记录起始行 (含被读取器略过的空行)
            let row_number = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(idx + 2);

            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if is_blank(&row_map) {
                continue;
            }

            records.push(RawRow {
                row_number,
                fields: row_map,
            });
        }

        Ok(records)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    sheet_name: String,
}

impl ExcelParser {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let range = workbook
            .worksheet_range(&self.sheet_name)
            .map_err(|e| {
                ImportError::ExcelParseError(format!("工作表 {}: {}", self.sheet_name, e))
            })?;

        // 区域可能不从 A1 开始
        let header_row_number = range.start().map_or(1, |(row, _)| row as usize + 1);

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or_else(|| {
            ImportError::ExcelParseError(format!("工作表 {} 无数据行", self.sheet_name))
        })?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            if is_blank(&row_map) {
                continue;
            }

            records.push(RawRow {
                row_number: header_row_number + idx + 1,
                fields: row_map,
            });
        }

        Ok(records)
    }
}

// ==========================================
// 教学工作量分配系统 - 导入层
// ==========================================
// 职责: 从 CSV / Excel 读取教师与课程目录
// ==========================================

pub mod catalog_importer;
pub mod error;
pub mod file_parser;

pub use catalog_importer::{derive_subject_id, CatalogImporter};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, RawRow};

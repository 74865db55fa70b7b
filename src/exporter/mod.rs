// ==========================================
// 教学工作量分配系统 - 导出层
// ==========================================

pub mod csv_exporter;
pub mod error;

pub use csv_exporter::{CsvExporter, EXPORT_HEADER};
pub use error::{ExportError, ExportResult};

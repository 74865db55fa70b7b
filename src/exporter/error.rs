// ==========================================
// 教学工作量分配系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    FileWriteError(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// 订单管控系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Excel 写入失败: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("文件写入失败: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("未知导出列: {0}")]
    UnknownColumn(String),

    #[error("导出列为空")]
    NoColumns,
}

pub type ExportResult<T> = Result<T, ExportError>;

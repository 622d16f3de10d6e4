// ==========================================
// 订单管控系统 - 导出层
// ==========================================
// 职责: 看板视图快照、合并结果写出
// 工具: rust_xlsxwriter
// ==========================================

pub mod error;
pub mod table_writer;
pub mod view_export;

pub use error::{ExportError, ExportResult};
pub use table_writer::{write_table, write_table_to_buffer};
pub use view_export::{default_file_name, export_view, ViewExporter, REPORT_SHEET_NAME};

// ==========================================
// 订单管控系统 - 导入层
// ==========================================
// 职责: 外部表格导入,生成订单行工作集
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod load_cache;
pub mod order_loader;
pub mod order_loader_trait;
pub mod row_validator;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{LoadError, LoadResult};
pub use field_mapper::OrderFieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use load_cache::LoadCache;
pub use order_loader::{LoadOutcome, OrderLoader};
pub use row_validator::RowValidator as RowValidatorImpl;

// 重导出 Trait 接口
pub use order_loader_trait::{DataCleaner, FieldMapper, FileParser, RawTable, RowValidator};

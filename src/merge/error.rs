// ==========================================
// 订单管控系统 - 合并模块错误类型
// ==========================================

use crate::export::ExportError;
use crate::importer::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("读取 {table} 失败: {source}")]
    Load {
        table: String,
        #[source]
        source: LoadError,
    },

    #[error("{table} 缺少合并键列: {}", .columns.join(", "))]
    MissingKeyColumns { table: String, columns: Vec<String> },

    #[error("写出合并结果失败: {0}")]
    Export(#[from] ExportError),
}

pub type MergeResult<T> = Result<T, MergeError>;

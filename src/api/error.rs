// ==========================================
// 订单管控系统 - API层错误类型
// ==========================================
// 职责: 汇总下层错误，给界面/命令行一个统一出口
// ==========================================

use crate::export::ExportError;
use crate::merge::MergeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("未指定订单表格（--input 或配置 input_path）")]
    NoInputConfigured,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

pub type ApiResult<T> = Result<T, ApiError>;

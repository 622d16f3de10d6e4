// ==========================================
// 订单管控系统 - API 层
// ==========================================
// 职责: 供界面与命令行调用的统一入口
// ==========================================

pub mod error;
pub mod order_api;

pub use error::{ApiError, ApiResult};
pub use order_api::{DashboardSnapshot, OrderApi};

// ==========================================
// 订单管控系统 - 看板数据层
// ==========================================
// 职责: 视图筛选、指标、提醒、金额格式
// 红线: 只产出数据，不负责渲染
// ==========================================

pub mod currency;
pub mod metrics;
pub mod notifications;
pub mod views;

pub use currency::format_brl;
pub use metrics::{DashboardMetrics, ProductFrequency};
pub use notifications::{stage_notifications, StageNotifications};
pub use views::{filter_options, select_view, DashboardView, FilterOptions, ViewFilter};

// ==========================================
// 订单管控系统 - 核心库
// ==========================================
// 职责: 订单表格加载、工序判定、交付状态、看板数据
// 技术栈: Rust + calamine/csv + rust_xlsxwriter
// 系统定位: 内部订单跟踪（人工决策，系统只做归类与提醒）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部表格
pub mod importer;

// 引擎层 - 业务规则
pub mod engine;

// 看板数据层 - 视图/指标/提醒
pub mod dashboard;

// 导出层 - xlsx 快照
pub mod export;

// 合并工具 - 订单表 × 补货表
pub mod merge;

// 配置层 - 系统配置
pub mod config;

// API 层 - 统一入口
pub mod api;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DeliveryStatus, SplitMark, Stage, StageRule};

// 领域实体
pub use domain::{ClassifiedOrder, LoadReport, OrderLine};

// 引擎
pub use engine::{classify_and_score, ClassifiedRows, PipelineOptions};

// API
pub use api::{DashboardSnapshot, OrderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "订单管控系统";

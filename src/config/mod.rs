// ==========================================
// 订单管控系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持文件 + 环境变量覆写
// 存储: JSON 配置文件
// ==========================================

pub mod app_config;
pub mod config_manager;
pub mod loader_config_trait;

// 重导出核心配置管理器
pub use app_config::{default_excluded_customer_refs, AppConfig, MergeConfig};
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult};
pub use loader_config_trait::LoaderConfigReader;

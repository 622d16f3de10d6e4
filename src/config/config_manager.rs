// ==========================================
// 订单管控系统 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、快照
// 优先级: 环境变量 > 配置文件 > 默认值
// ==========================================

use crate::config::app_config::AppConfig;
use crate::config::loader_config_trait::LoaderConfigReader;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

// ==========================================
// 配置键（环境变量）
// ==========================================
pub mod config_keys {
    pub const INPUT_PATH: &str = "ORDER_CONTROL_INPUT";
    pub const CACHE_TTL_SECS: &str = "ORDER_CONTROL_CACHE_TTL_SECS";
    pub const LOCALE: &str = "ORDER_CONTROL_LOCALE";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置序列化失败: {0}")]
    SerializeError(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::from_config(AppConfig::default())
    }
}

impl ConfigManager {
    /// 从已有配置创建（测试与嵌入使用）
    pub fn from_config(config: AppConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// 默认配置文件路径: <系统配置目录>/order-control/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("order-control").join("config.json"))
    }

    /// 加载配置
    ///
    /// # 参数
    /// - path: 显式指定的配置文件；None 时尝试默认路径，不存在则使用默认值
    ///
    /// # 返回
    /// - Ok(ConfigManager): 已应用环境变量覆写
    /// - Err(ConfigError): 显式指定的文件不可读或格式错误
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut manager = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => {
                    debug!("未找到配置文件，使用默认配置");
                    Self::default()
                }
            },
        };

        manager.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(manager)
    }

    /// 从 JSON 文件读取配置
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            message: e.to_string(),
        })?;

        let config: AppConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: display.clone(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), "配置文件加载完成");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 应用环境变量覆写
    ///
    /// 读取函数可注入，便于测试
    pub fn apply_env_overrides<F>(&mut self, read: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = read(config_keys::INPUT_PATH) {
            if !input.trim().is_empty() {
                self.config.input_path = Some(PathBuf::from(input.trim()));
            }
        }

        if let Some(value) = read(config_keys::CACHE_TTL_SECS) {
            match value.trim().parse::<u64>() {
                Ok(ttl) => self.config.cache_ttl_secs = ttl,
                Err(_) => warn!(
                    config_key = config_keys::CACHE_TTL_SECS,
                    raw_value = %value,
                    "缓存有效期格式错误，保持原配置"
                ),
            }
        }

        if let Some(locale) = read(config_keys::LOCALE) {
            if !locale.trim().is_empty() {
                self.config.locale = locale.trim().to_string();
            }
        }
    }

    /// 当前配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 可变配置（命令行参数覆写使用）
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// 配置来源文件
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON 格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}

// ==========================================
// LoaderConfigReader Trait 实现
// ==========================================
impl LoaderConfigReader for ConfigManager {
    fn sheet_name(&self) -> Option<String> {
        self.config.sheet_name.clone()
    }

    fn required_columns(&self) -> Vec<String> {
        self.config.required_columns.clone()
    }

    fn excluded_customer_refs(&self) -> Vec<String> {
        self.config.excluded_customer_refs.clone()
    }

    fn excluded_customer_names(&self) -> Vec<String> {
        self.config.excluded_customer_names.clone()
    }

    fn drop_missing_customer_ref(&self) -> bool {
        self.config.drop_missing_customer_ref
    }

    fn split_enabled(&self) -> bool {
        self.config.split_enabled
    }

    fn order_date_grace_days(&self) -> i64 {
        self.config.order_date_grace_days
    }

    fn cache_ttl_secs(&self) -> u64 {
        self.config.cache_ttl_secs
    }
}

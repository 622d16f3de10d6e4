// ==========================================
// 订单管控系统 - 配置项全集
// ==========================================
// 存储: JSON 配置文件（缺省字段取默认值）
// ==========================================

use crate::domain::columns;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认排除名单（内部/非销售客户订单号）
pub fn default_excluded_customer_refs() -> Vec<String> {
    [
        "TUMELERO",
        "ESTOQUE FOX",
        "TELHA 14.10.24",
        "TELHA 18.10.24",
        "FANAN/TERUYA",
        "HC FOX 11.11.24",
        "TUMELEIRO 2",
        "AMOSTRAS",
        "LOJAS 20.12.2024",
        "SALDO TELHANORTE",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ==========================================
// AppConfig - 系统配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 订单表格路径（命令行 --input 优先）
    pub input_path: Option<PathBuf>,

    /// 工作表名（None = 第一个工作表）
    pub sheet_name: Option<String>,

    /// 必需列
    pub required_columns: Vec<String>,

    /// 客户订单号排除名单
    pub excluded_customer_refs: Vec<String>,

    /// 客户简称排除名单（不区分大小写，默认为空）
    pub excluded_customer_names: Vec<String>,

    /// 客户订单号为空的行是否剔除
    pub drop_missing_customer_ref: bool,

    /// 是否启用数量拆分
    pub split_enabled: bool,

    /// 下单日期宽限天数（超过即视为"下单逾期"）
    pub order_date_grace_days: i64,

    /// 加载缓存有效期（秒）
    pub cache_ttl_secs: u64,

    /// 导出列
    pub export_columns: Vec<String>,

    /// 合并工具配置
    pub merge: MergeConfig,

    /// 界面语言（pt-BR / en）
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            sheet_name: None,
            required_columns: columns::default_required_columns(),
            excluded_customer_refs: default_excluded_customer_refs(),
            excluded_customer_names: Vec::new(),
            drop_missing_customer_ref: true,
            split_enabled: true,
            order_date_grace_days: 1,
            cache_ttl_secs: 300,
            export_columns: columns::default_export_columns(),
            merge: MergeConfig::default(),
            locale: "pt-BR".to_string(),
        }
    }
}

// ==========================================
// MergeConfig - 合并工具配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// 关联键
    pub key_columns: Vec<String>,

    /// 订单表重名列后缀
    pub orders_suffix: String,

    /// 履约表重名列后缀
    pub fulfillment_suffix: String,

    /// 订单表工作表名
    pub orders_sheet: Option<String>,

    /// 履约表工作表名
    pub fulfillment_sheet: Option<String>,

    /// 输出工作表名
    pub output_sheet: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            key_columns: vec![
                columns::CUSTOMER_ORDER_REF.to_string(),
                columns::MODEL_CODE.to_string(),
                columns::PRODUCT_CODE.to_string(),
            ],
            orders_suffix: "_pedidos".to_string(),
            fulfillment_suffix: "_abastecidos".to_string(),
            orders_sheet: None,
            fulfillment_sheet: None,
            output_sheet: "Planilha1".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"split_enabled": false, "merge": {"orders_suffix": "_a"}}"#)
                .unwrap();

        assert!(!config.split_enabled);
        assert_eq!(config.merge.orders_suffix, "_a");
        assert_eq!(config.merge.fulfillment_suffix, "_abastecidos");
        assert_eq!(config.order_date_grace_days, 1);
        assert!(config.excluded_customer_refs.contains(&"TUMELERO".to_string()));
    }
}

// ==========================================
// 订单管控系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射（不做类型转换）
// 兼容: 大小写/空白差异、合并工具产生的后缀列
// ==========================================

use crate::domain::columns;
use crate::domain::order::RawOrderRecord;
use crate::importer::order_loader_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

/// 合并工具给订单表重名列追加的默认后缀
pub const DEFAULT_ORDERS_SUFFIX: &str = "_pedidos";

pub struct OrderFieldMapper {
    // 依次尝试的列名后缀（空后缀总是最先尝试）
    column_suffixes: Vec<String>,
}

impl Default for OrderFieldMapper {
    fn default() -> Self {
        Self::new(vec![DEFAULT_ORDERS_SUFFIX.to_string()])
    }
}

impl OrderFieldMapper {
    pub fn new(column_suffixes: Vec<String>) -> Self {
        Self { column_suffixes }
    }

    /// 列名归一化: 去首尾空白 + 小写
    fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// 候选列名: 原名 + 各后缀变体
    fn candidates(&self, key: &str) -> Vec<String> {
        let mut names = vec![key.to_string()];
        for suffix in &self.column_suffixes {
            names.push(format!("{}{}", key, suffix));
        }
        names
    }

    /// 提取字符串字段（返回 Option），空白视为缺失
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        for candidate in self.candidates(key) {
            // 精确匹配优先
            let value = row.get(&candidate).or_else(|| {
                let wanted = Self::normalize(&candidate);
                row.iter()
                    .find(|(header, _)| Self::normalize(header) == wanted)
                    .map(|(_, v)| v)
            });

            if let Some(v) = value {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

impl FieldMapperTrait for OrderFieldMapper {
    fn map_to_raw_order(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawOrderRecord {
        RawOrderRecord {
            // 主键
            order_id: self.get_string(row, columns::ORDER_ID),

            // 客户信息
            customer_order_ref: self.get_string(row, columns::CUSTOMER_ORDER_REF),
            customer_display_name: self.get_string(row, columns::CUSTOMER_DISPLAY_NAME),

            // 物料信息
            product_code: self.get_string(row, columns::PRODUCT_CODE),
            model_code: self.get_string(row, columns::MODEL_CODE),

            // 日期
            order_date: self.get_string(row, columns::ORDER_DATE),
            invoice_date: self.get_string(row, columns::INVOICE_DATE),
            expected_delivery_date: self.get_string(row, columns::EXPECTED_DELIVERY_DATE),

            // 数量与金额（Valor Total 不读取，由数量与单价计算）
            quantity: self.get_string(row, columns::QUANTITY),
            unit_price: self.get_string(row, columns::UNIT_PRICE),

            // 生产数量
            quantity_to_produce: self.get_string(row, columns::QUANTITY_TO_PRODUCE),
            quantity_produced: self.get_string(row, columns::QUANTITY_PRODUCED),
            quantity_to_release: self.get_string(row, columns::QUANTITY_TO_RELEASE),

            // 来源标记
            origin: self.get_string(row, columns::ORIGIN),

            // 元信息
            row_number,
        }
    }

    fn missing_columns(&self, headers: &[String], required: &[String]) -> Vec<String> {
        let present: Vec<String> = headers.iter().map(|h| Self::normalize(h)).collect();

        required
            .iter()
            .filter(|column| {
                !self
                    .candidates(column)
                    .iter()
                    .any(|candidate| present.contains(&Self::normalize(candidate)))
            })
            .cloned()
            .collect()
    }
}

// ==========================================
// 订单管控系统 - 订单行领域模型
// ==========================================
// 职责: 订单行 / 原始记录 / 分类结果 / 导入报告
// 红线: total_value 不落字段，永远由 quantity * unit_price 计算
// ==========================================

use crate::domain::types::{DeliveryStatus, SplitMark, Stage, StageRule};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderLine - 工作数据集中的一行订单
// ==========================================
// 用途: 导入层写入，引擎层读取（拆分器可改写数量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    // ===== 主键 =====
    pub order_id: String, // 订单号（Nr.pedido），带 '-' 后缀即为放行子单

    // ===== 客户信息 =====
    pub customer_order_ref: String,    // 客户订单号（Ped. Cliente）
    pub customer_display_name: String, // 客户简称（Fantasia）

    // ===== 物料信息 =====
    pub product_code: String, // 产品代码（Produto）
    pub model_code: String,   // 型号（Modelo）

    // ===== 日期 =====
    pub order_date: Option<NaiveDateTime>,             // 下单日期（Dt.pedido）
    pub invoice_date: Option<NaiveDateTime>,           // 开票日期（Dt.fat.），空 = 未开票
    pub expected_delivery_date: Option<NaiveDateTime>, // 预计交付（Prev.entrega）

    // ===== 数量与金额 =====
    pub quantity: f64,   // 数量（Qtd.）
    pub unit_price: f64, // 单价（Valor Unit.）

    // ===== 生产数量 =====
    pub quantity_to_produce: Option<f64>, // 待生产（Qtd.a produzir）
    pub quantity_produced: Option<f64>,   // 已生产（Qtd. Produzida）
    pub quantity_to_release: Option<f64>, // 待放行（Qtd.a liberar）

    // ===== 来源标记 =====
    pub origin: Option<String>, // 来源（Origem），空 = 尚未关联工单

    // ===== 内部字段 =====
    pub split: Option<SplitMark>, // 拆分标记（拆分器写入）
    pub row_number: usize,        // 源表格行号（用于报告）
}

impl OrderLine {
    /// 创建仅含订单号的空行（测试与构造辅助）
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            customer_order_ref: String::new(),
            customer_display_name: String::new(),
            product_code: String::new(),
            model_code: String::new(),
            order_date: None,
            invoice_date: None,
            expected_delivery_date: None,
            quantity: 0.0,
            unit_price: 0.0,
            quantity_to_produce: None,
            quantity_produced: None,
            quantity_to_release: None,
            origin: None,
            split: None,
            row_number: 0,
        }
    }

    /// 总金额 = 单价 * 数量
    pub fn total_value(&self) -> f64 {
        self.unit_price * self.quantity
    }

    /// 主单号（第一个 '-' 之前的部分）
    pub fn base_id(&self) -> &str {
        split_order_id(&self.order_id).0
    }

    /// 是否为放行子单（订单号含 '-'）
    pub fn has_suffix(&self) -> bool {
        split_order_id(&self.order_id).1
    }

    /// 来源标记是否为空
    pub fn origin_is_empty(&self) -> bool {
        self.origin
            .as_deref()
            .map(|o| o.trim().is_empty())
            .unwrap_or(true)
    }
}

/// 拆分订单号为 (主单号, 是否带后缀)
pub fn split_order_id(order_id: &str) -> (&str, bool) {
    match order_id.split_once('-') {
        Some((base, _)) => (base, true),
        None => (order_id, false),
    }
}

// ==========================================
// RawOrderRecord - 字段映射后的中间结构
// ==========================================
// 用途: FieldMapper 输出，尚未做过滤与清洗
#[derive(Debug, Clone, Default)]
pub struct RawOrderRecord {
    pub order_id: Option<String>,
    pub customer_order_ref: Option<String>,
    pub customer_display_name: Option<String>,
    pub product_code: Option<String>,
    pub model_code: Option<String>,
    pub order_date: Option<String>,
    pub invoice_date: Option<String>,
    pub expected_delivery_date: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub quantity_to_produce: Option<String>,
    pub quantity_produced: Option<String>,
    pub quantity_to_release: Option<String>,
    pub origin: Option<String>,
    pub row_number: usize,
}

// ==========================================
// ClassifiedOrder - 流水线输出
// ==========================================
// 红线: 工序与状态是派生值，只存在于分类结果上
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedOrder {
    pub line: OrderLine,
    pub stage: Stage,
    pub stage_rule: StageRule,
    pub status: DeliveryStatus,
}

impl ClassifiedOrder {
    pub fn total_value(&self) -> f64 {
        self.line.total_value()
    }
}

// ==========================================
// 导入报告
// ==========================================

/// 类型转换告警（用哨兵值替代，不阻断导入）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionWarning {
    pub row_number: usize,
    pub field: String,
    pub raw_value: String,
    pub substituted: String, // "0" 或 "null"
}

/// 行被剔除的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropReason {
    MissingOrderId,       // 订单号为空
    NanOrderId,           // 订单号为 "nan"
    ExcludedCustomerRef,  // 客户订单号在排除名单中
    ExcludedCustomerName, // 客户简称在排除名单中（内部客户）
    MissingCustomerRef,   // 客户订单号为空
}

/// 被剔除的行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRow {
    pub row_number: usize,
    pub order_id: Option<String>,
    pub reason: DropReason,
}

/// 导入汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub dropped: Vec<DroppedRow>,
    pub warnings: Vec<CoercionWarning>,
}

impl LoadReport {
    pub fn dropped_count(&self, reason: DropReason) -> usize {
        self.dropped.iter().filter(|d| d.reason == reason).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_order_id() {
        assert_eq!(split_order_id("4500"), ("4500", false));
        assert_eq!(split_order_id("4500-1"), ("4500", true));
        assert_eq!(split_order_id("4500-1-2"), ("4500", true));
    }

    #[test]
    fn test_total_value_follows_quantity() {
        let mut line = OrderLine::new("1");
        line.unit_price = 2.5;
        line.quantity = 4.0;
        assert_eq!(line.total_value(), 10.0);

        line.quantity = 6.0;
        assert_eq!(line.total_value(), 15.0);
    }

    #[test]
    fn test_origin_is_empty() {
        let mut line = OrderLine::new("1-1");
        assert!(line.origin_is_empty());
        line.origin = Some("   ".to_string());
        assert!(line.origin_is_empty());
        line.origin = Some("AUTO".to_string());
        assert!(!line.origin_is_empty());
    }
}

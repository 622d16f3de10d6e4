// ==========================================
// 订单管控系统 - 领域类型定义
// ==========================================
// 红线: 每行订单在流水线结束后有且仅有一个工序、一个交付状态
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 工序 (Workflow Stage)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Separation,  // 分拣
    Purchasing,  // 采购
    Packaging,   // 包装
    Shipping,    // 发运
    NoWorkOrder, // 未生成工单
}

impl Stage {
    /// 全部工序（看板页签顺序）
    pub const ALL: [Stage; 5] = [
        Stage::Separation,
        Stage::Purchasing,
        Stage::Packaging,
        Stage::Shipping,
        Stage::NoWorkOrder,
    ];

    /// i18n 键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Stage::Separation => "stage.separation",
            Stage::Purchasing => "stage.purchasing",
            Stage::Packaging => "stage.packaging",
            Stage::Shipping => "stage.shipping",
            Stage::NoWorkOrder => "stage.no_work_order",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Separation => write!(f, "SEPARATION"),
            Stage::Purchasing => write!(f, "PURCHASING"),
            Stage::Packaging => write!(f, "PACKAGING"),
            Stage::Shipping => write!(f, "SHIPPING"),
            Stage::NoWorkOrder => write!(f, "NO_WORK_ORDER"),
        }
    }
}

impl FromStr for Stage {
    type Err = String;

    /// 兼容英文代码与源表格中的葡语工序名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "separation" | "separação" | "separacao" => Ok(Stage::Separation),
            "purchasing" | "compras" => Ok(Stage::Purchasing),
            "packaging" | "embalagem" => Ok(Stage::Packaging),
            "shipping" | "expedição" | "expedicao" => Ok(Stage::Shipping),
            "no_work_order" | "noworkorder" | "sem_o.e." | "sem_oe" => Ok(Stage::NoWorkOrder),
            _ => Err(format!("未知工序: {}", s)),
        }
    }
}

// ==========================================
// 交付状态 (Delivery Status)
// ==========================================
// 发票日期是"已交付"的唯一依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,   // 待交付
    Late,      // 已逾期
    Delivered, // 已交付
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 3] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Late,
        DeliveryStatus::Delivered,
    ];

    pub fn i18n_key(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "status.pending",
            DeliveryStatus::Late => "status.late",
            DeliveryStatus::Delivered => "status.delivered",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryStatus::Pending => write!(f, "PENDING"),
            DeliveryStatus::Late => write!(f, "LATE"),
            DeliveryStatus::Delivered => write!(f, "DELIVERED"),
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Ok(DeliveryStatus::Pending),
            "late" | "atrasado" => Ok(DeliveryStatus::Late),
            "delivered" | "entregue" => Ok(DeliveryStatus::Delivered),
            _ => Err(format!("未知交付状态: {}", s)),
        }
    }
}

// ==========================================
// 工序判定规则 (Stage Rule)
// ==========================================
// 红线: 每次判定必须输出命中的规则（可解释性）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageRule {
    SplitReleased,         // 拆分后的原行 → 发运
    SplitRemainder,        // 拆分产生的差额行 → 采购
    ParentWithRelease,     // 主单已存在放行子单 → 发运
    ParentWithoutRelease,  // 主单无放行子单 → 分拣
    OriginAssigned,        // 子单已有来源标记 → 未生成工单
    Produced,              // 已生产数量 > 0 → 发运
    NoProductionOrder,     // 待生产数量为空或 0 → 未生成工单
    AwaitingPackaging,     // 待放行数量 > 0 → 包装
    AwaitingPurchase,      // 其余 → 采购
}

impl StageRule {
    /// 规则对应的工序
    pub fn stage(&self) -> Stage {
        match self {
            StageRule::SplitReleased | StageRule::ParentWithRelease | StageRule::Produced => {
                Stage::Shipping
            }
            StageRule::SplitRemainder | StageRule::AwaitingPurchase => Stage::Purchasing,
            StageRule::ParentWithoutRelease => Stage::Separation,
            StageRule::OriginAssigned | StageRule::NoProductionOrder => Stage::NoWorkOrder,
            StageRule::AwaitingPackaging => Stage::Packaging,
        }
    }
}

impl fmt::Display for StageRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            StageRule::SplitReleased => "SPLIT_RELEASED",
            StageRule::SplitRemainder => "SPLIT_REMAINDER",
            StageRule::ParentWithRelease => "PARENT_WITH_RELEASE",
            StageRule::ParentWithoutRelease => "PARENT_WITHOUT_RELEASE",
            StageRule::OriginAssigned => "ORIGIN_ASSIGNED",
            StageRule::Produced => "PRODUCED",
            StageRule::NoProductionOrder => "NO_PRODUCTION_ORDER",
            StageRule::AwaitingPackaging => "AWAITING_PACKAGING",
            StageRule::AwaitingPurchase => "AWAITING_PURCHASE",
        };
        write!(f, "{}", code)
    }
}

// ==========================================
// 拆分标记 (Split Mark)
// ==========================================
// 已标记的行不会被再次拆分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SplitMark {
    Released,  // 原行，保留已放行数量
    Remainder, // 新行，承载未满足的差额
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Separation.to_string(), "SEPARATION");
        assert_eq!(Stage::NoWorkOrder.to_string(), "NO_WORK_ORDER");
    }

    #[test]
    fn test_stage_from_str_accepts_source_names() {
        assert_eq!("Expedição".parse::<Stage>().unwrap(), Stage::Shipping);
        assert_eq!("compras".parse::<Stage>().unwrap(), Stage::Purchasing);
        assert_eq!("no-work-order".parse::<Stage>().unwrap(), Stage::NoWorkOrder);
        assert!("desconhecido".parse::<Stage>().is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Atrasado".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Late);
        assert_eq!("delivered".parse::<DeliveryStatus>().unwrap(), DeliveryStatus::Delivered);
    }

    #[test]
    fn test_every_rule_maps_to_a_stage() {
        assert_eq!(StageRule::SplitRemainder.stage(), Stage::Purchasing);
        assert_eq!(StageRule::SplitReleased.stage(), Stage::Shipping);
        assert_eq!(StageRule::NoProductionOrder.stage(), Stage::NoWorkOrder);
        assert_eq!(StageRule::AwaitingPackaging.stage(), Stage::Packaging);
    }

    #[test]
    fn test_stage_serde_format() {
        let json = serde_json::to_string(&Stage::NoWorkOrder).unwrap();
        assert_eq!(json, "\"NO_WORK_ORDER\"");
    }
}

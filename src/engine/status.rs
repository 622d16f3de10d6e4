// ==========================================
// 订单管控系统 - 交付状态判定
// ==========================================
// 规则:
//   有开票日期 → 已交付（唯一依据）
//   否则预计交付早于当前时间 → 已逾期
//   否则 → 待交付
// 附加规则: 下单日期 + 宽限天数 < 当前时间 → 下单逾期（仅用于提醒）
// ==========================================

use crate::domain::order::OrderLine;
use crate::domain::types::DeliveryStatus;
use chrono::{Duration, NaiveDateTime};

/// 默认下单宽限天数
pub const DEFAULT_ORDER_DATE_GRACE_DAYS: i64 = 1;

#[derive(Debug, Clone, Copy)]
pub struct StatusDeriver {
    grace_days: i64,
}

impl Default for StatusDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_DATE_GRACE_DAYS)
    }
}

impl StatusDeriver {
    pub fn new(grace_days: i64) -> Self {
        Self { grace_days }
    }

    pub fn grace_days(&self) -> i64 {
        self.grace_days
    }

    /// 判定交付状态
    pub fn derive(&self, line: &OrderLine, now: NaiveDateTime) -> DeliveryStatus {
        if line.invoice_date.is_some() {
            return DeliveryStatus::Delivered;
        }
        match line.expected_delivery_date {
            Some(expected) if expected < now => DeliveryStatus::Late,
            _ => DeliveryStatus::Pending,
        }
    }

    /// 下单逾期: 下单日期 + 宽限天数 < now
    pub fn is_order_date_overdue(&self, line: &OrderLine, now: NaiveDateTime) -> bool {
        line.order_date
            .map(|ordered| ordered + Duration::days(self.grace_days) < now)
            .unwrap_or(false)
    }
}

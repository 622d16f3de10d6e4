// ==========================================
// 订单管控系统 - 工序提醒
// ==========================================
// 每个工序视图: 待交付数 / 已逾期数 / 下单逾期数
// ==========================================

use crate::dashboard::views::DashboardView;
use crate::domain::order::ClassifiedOrder;
use crate::domain::types::{DeliveryStatus, Stage};
use crate::engine::status::StatusDeriver;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageNotifications {
    pub view: DashboardView,
    pub pending: usize,
    pub late: usize,
    pub order_date_overdue: usize,
}

impl StageNotifications {
    pub fn has_alerts(&self) -> bool {
        self.late > 0 || self.order_date_overdue > 0
    }
}

/// 计算全部工序视图的提醒
pub fn stage_notifications<'a, I>(
    rows: I,
    deriver: &StatusDeriver,
    now: NaiveDateTime,
) -> Vec<StageNotifications>
where
    I: IntoIterator<Item = &'a ClassifiedOrder>,
{
    let mut out: Vec<StageNotifications> = Stage::ALL
        .iter()
        .map(|stage| StageNotifications {
            view: DashboardView::Stage(*stage),
            pending: 0,
            late: 0,
            order_date_overdue: 0,
        })
        .collect();

    for row in rows {
        let Some(slot) = out.iter_mut().find(|n| n.view.includes(row)) else {
            continue;
        };
        match row.status {
            DeliveryStatus::Pending => slot.pending += 1,
            DeliveryStatus::Late => slot.late += 1,
            DeliveryStatus::Delivered => {}
        }
        if deriver.is_order_date_overdue(&row.line, now) {
            slot.order_date_overdue += 1;
        }
    }

    out
}

// ==========================================
// 订单管控系统 - 看板视图与筛选
// ==========================================
// 视图: 总览（全部行）+ 每个工序一个视图
// 红线: 工序视图不含已交付的行
// 筛选: 未设置的条件视为"全部"
// ==========================================

use crate::domain::order::ClassifiedOrder;
use crate::domain::types::{DeliveryStatus, Stage};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

// ==========================================
// DashboardView - 看板视图
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardView {
    Portfolio,
    Stage(Stage),
}

impl DashboardView {
    pub const ALL: [DashboardView; 6] = [
        DashboardView::Portfolio,
        DashboardView::Stage(Stage::Separation),
        DashboardView::Stage(Stage::Purchasing),
        DashboardView::Stage(Stage::Packaging),
        DashboardView::Stage(Stage::Shipping),
        DashboardView::Stage(Stage::NoWorkOrder),
    ];

    /// 行是否属于该视图
    pub fn includes(&self, row: &ClassifiedOrder) -> bool {
        match self {
            DashboardView::Portfolio => true,
            DashboardView::Stage(stage) => {
                row.stage == *stage && row.status != DeliveryStatus::Delivered
            }
        }
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            DashboardView::Portfolio => "view.portfolio",
            DashboardView::Stage(stage) => stage.i18n_key(),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardView::Portfolio => write!(f, "PORTFOLIO"),
            DashboardView::Stage(stage) => write!(f, "{}", stage),
        }
    }
}

impl FromStr for DashboardView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portfolio" | "carteira" => Ok(DashboardView::Portfolio),
            _ => s.parse::<Stage>().map(DashboardView::Stage),
        }
    }
}

// ==========================================
// ViewFilter - 视图筛选条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub customer_display_name: Option<String>,
    pub customer_order_ref: Option<String>,
    pub status: Option<DeliveryStatus>,
    pub stage: Option<Stage>,
    pub order_date_from: Option<NaiveDate>, // 含当天
    pub order_date_to: Option<NaiveDate>,   // 含当天
}

impl ViewFilter {
    pub fn is_empty(&self) -> bool {
        *self == ViewFilter::default()
    }

    /// 行是否满足全部条件
    ///
    /// 设置了日期区间时，没有下单日期的行不满足
    pub fn matches(&self, row: &ClassifiedOrder) -> bool {
        let line = &row.line;

        if let Some(name) = &self.customer_display_name {
            if line.customer_display_name != *name {
                return false;
            }
        }
        if let Some(reference) = &self.customer_order_ref {
            if line.customer_order_ref != *reference {
                return false;
            }
        }
        if let Some(status) = self.status {
            if row.status != status {
                return false;
            }
        }
        if let Some(stage) = self.stage {
            if row.stage != stage {
                return false;
            }
        }

        if self.order_date_from.is_some() || self.order_date_to.is_some() {
            let Some(ordered) = line.order_date.map(|d| d.date()) else {
                return false;
            };
            if self.order_date_from.map(|from| ordered < from).unwrap_or(false) {
                return false;
            }
            if self.order_date_to.map(|to| ordered > to).unwrap_or(false) {
                return false;
            }
        }

        true
    }
}

/// 选出视图中满足筛选条件的行（保持原顺序）
pub fn select_view<'a, I>(rows: I, view: DashboardView, filter: &ViewFilter) -> Vec<&'a ClassifiedOrder>
where
    I: IntoIterator<Item = &'a ClassifiedOrder>,
{
    rows.into_iter()
        .filter(|row| view.includes(row) && filter.matches(row))
        .collect()
}

// ==========================================
// FilterOptions - 下拉选项
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub customer_display_names: Vec<String>,
    pub customer_order_refs: Vec<String>,
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// 视图内的客户与客户订单号（按首次出现顺序去重）
pub fn filter_options<'a, I>(rows: I, view: DashboardView) -> FilterOptions
where
    I: IntoIterator<Item = &'a ClassifiedOrder>,
{
    let in_view: Vec<&ClassifiedOrder> = rows.into_iter().filter(|r| view.includes(r)).collect();
    FilterOptions {
        customer_display_names: distinct_in_order(
            in_view.iter().map(|r| r.line.customer_display_name.as_str()),
        ),
        customer_order_refs: distinct_in_order(
            in_view.iter().map(|r| r.line.customer_order_ref.as_str()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderLine;
    use crate::domain::types::StageRule;

    fn row(id: &str, stage: Stage, status: DeliveryStatus, customer: &str, day: u32) -> ClassifiedOrder {
        let mut line = OrderLine::new(id);
        line.customer_display_name = customer.to_string();
        line.customer_order_ref = format!("PC-{}", id);
        line.order_date = NaiveDate::from_ymd_opt(2024, 10, day).and_then(|d| d.and_hms_opt(0, 0, 0));
        let stage_rule = match stage {
            Stage::Separation => StageRule::ParentWithoutRelease,
            Stage::Purchasing => StageRule::AwaitingPurchase,
            Stage::Packaging => StageRule::AwaitingPackaging,
            Stage::Shipping => StageRule::Produced,
            Stage::NoWorkOrder => StageRule::NoProductionOrder,
        };
        ClassifiedOrder {
            line,
            stage,
            stage_rule,
            status,
        }
    }

    fn rows() -> Vec<ClassifiedOrder> {
        vec![
            row("1", Stage::Separation, DeliveryStatus::Pending, "ACME", 1),
            row("2", Stage::Separation, DeliveryStatus::Delivered, "ACME", 2),
            row("3", Stage::Purchasing, DeliveryStatus::Late, "BETA", 3),
            row("4", Stage::Separation, DeliveryStatus::Late, "BETA", 5),
        ]
    }

    #[test]
    fn test_stage_view_excludes_delivered() {
        let rows = rows();
        let view = select_view(&rows, DashboardView::Stage(Stage::Separation), &ViewFilter::default());
        let ids: Vec<&str> = view.iter().map(|r| r.line.order_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let all = select_view(&rows, DashboardView::Portfolio, &ViewFilter::default());
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_filter_combines_conditions() {
        let rows = rows();
        let filter = ViewFilter {
            customer_display_name: Some("BETA".to_string()),
            status: Some(DeliveryStatus::Late),
            ..Default::default()
        };

        let view = select_view(&rows, DashboardView::Portfolio, &filter);
        assert_eq!(view.len(), 2);

        let filter = ViewFilter {
            stage: Some(Stage::Purchasing),
            ..filter
        };
        assert_eq!(select_view(&rows, DashboardView::Portfolio, &filter).len(), 1);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let rows = rows();
        let filter = ViewFilter {
            order_date_from: NaiveDate::from_ymd_opt(2024, 10, 2),
            order_date_to: NaiveDate::from_ymd_opt(2024, 10, 3),
            ..Default::default()
        };

        let view = select_view(&rows, DashboardView::Portfolio, &filter);
        let ids: Vec<&str> = view.iter().map(|r| r.line.order_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
    }

    #[test]
    fn test_date_range_skips_rows_without_order_date() {
        let mut rows = rows();
        rows[0].line.order_date = None;
        let filter = ViewFilter {
            order_date_to: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..Default::default()
        };

        assert_eq!(select_view(&rows, DashboardView::Portfolio, &filter).len(), 3);
    }

    #[test]
    fn test_filter_options_distinct_in_order() {
        let rows = rows();
        let options = filter_options(&rows, DashboardView::Portfolio);
        assert_eq!(options.customer_display_names, vec!["ACME", "BETA"]);
        assert_eq!(options.customer_order_refs.len(), 4);

        let options = filter_options(&rows, DashboardView::Stage(Stage::Purchasing));
        assert_eq!(options.customer_display_names, vec!["BETA"]);
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("carteira".parse::<DashboardView>().unwrap(), DashboardView::Portfolio);
        assert_eq!(
            "compras".parse::<DashboardView>().unwrap(),
            DashboardView::Stage(Stage::Purchasing)
        );
        assert_eq!(
            "no-work-order".parse::<DashboardView>().unwrap(),
            DashboardView::Stage(Stage::NoWorkOrder)
        );
    }
}

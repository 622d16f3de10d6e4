// ==========================================
// 订单管控系统 - 看板指标
// ==========================================
// 输入: 已筛选的分类结果
// 输出: 订单数 / 行数 / 待交付数 / 型号数 / 总数量
//       各工序金额与行数 / 各状态金额 / 未结余额 / 已开票金额
//       产品出现频次排行
// ==========================================

use crate::domain::order::ClassifiedOrder;
use crate::domain::types::{DeliveryStatus, Stage};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// 产品频次
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFrequency {
    pub product_code: String,
    pub count: usize,
    pub model_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub distinct_customer_orders: usize,
    pub item_count: usize,
    pub pending_count: usize,
    pub distinct_models: usize,
    pub total_quantity: f64,
    pub value_by_stage: BTreeMap<Stage, f64>,
    pub count_by_stage: BTreeMap<Stage, usize>,
    pub value_by_status: BTreeMap<DeliveryStatus, f64>,
    pub outstanding_value: f64, // 待交付 + 已逾期
    pub delivered_value: f64,
    pub product_frequency: Vec<ProductFrequency>,
}

impl DashboardMetrics {
    pub fn compute<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedOrder>,
    {
        let mut metrics = DashboardMetrics {
            value_by_stage: Stage::ALL.iter().map(|s| (*s, 0.0)).collect(),
            count_by_stage: Stage::ALL.iter().map(|s| (*s, 0)).collect(),
            value_by_status: DeliveryStatus::ALL.iter().map(|s| (*s, 0.0)).collect(),
            ..Default::default()
        };

        let mut customer_orders: HashSet<&str> = HashSet::new();
        let mut models: HashSet<&str> = HashSet::new();
        let mut products: HashMap<&str, (usize, BTreeSet<&str>)> = HashMap::new();

        for row in rows {
            let line = &row.line;
            let value = row.total_value();

            metrics.item_count += 1;
            metrics.total_quantity += line.quantity;
            if row.status == DeliveryStatus::Pending {
                metrics.pending_count += 1;
            }

            *metrics.value_by_stage.entry(row.stage).or_insert(0.0) += value;
            *metrics.count_by_stage.entry(row.stage).or_insert(0) += 1;
            *metrics.value_by_status.entry(row.status).or_insert(0.0) += value;

            if !line.customer_order_ref.is_empty() {
                customer_orders.insert(&line.customer_order_ref);
            }
            if !line.model_code.is_empty() {
                models.insert(&line.model_code);
            }
            if !line.product_code.is_empty() {
                let entry = products.entry(&line.product_code).or_default();
                entry.0 += 1;
                if !line.model_code.is_empty() {
                    entry.1.insert(&line.model_code);
                }
            }
        }

        metrics.distinct_customer_orders = customer_orders.len();
        metrics.distinct_models = models.len();
        metrics.delivered_value = metrics.value_by_status[&DeliveryStatus::Delivered];
        metrics.outstanding_value = metrics.value_by_status[&DeliveryStatus::Pending]
            + metrics.value_by_status[&DeliveryStatus::Late];

        let mut ranking: Vec<ProductFrequency> = products
            .into_iter()
            .map(|(code, (count, models))| ProductFrequency {
                product_code: code.to_string(),
                count,
                model_codes: models.into_iter().map(str::to_string).collect(),
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.product_code.cmp(&b.product_code))
        });
        metrics.product_frequency = ranking;

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderLine;
    use crate::domain::types::StageRule;

    fn row(
        reference: &str,
        product: &str,
        model: &str,
        qty: f64,
        price: f64,
        stage: Stage,
        status: DeliveryStatus,
    ) -> ClassifiedOrder {
        let mut line = OrderLine::new("1");
        line.customer_order_ref = reference.to_string();
        line.product_code = product.to_string();
        line.model_code = model.to_string();
        line.quantity = qty;
        line.unit_price = price;
        ClassifiedOrder {
            line,
            stage,
            stage_rule: StageRule::ParentWithoutRelease,
            status,
        }
    }

    #[test]
    fn test_compute_metrics() {
        let rows = vec![
            row("PC-1", "P1", "M1", 2.0, 10.0, Stage::Separation, DeliveryStatus::Pending),
            row("PC-1", "P1", "M2", 1.0, 5.0, Stage::Shipping, DeliveryStatus::Late),
            row("PC-2", "P2", "M1", 4.0, 1.5, Stage::Separation, DeliveryStatus::Delivered),
        ];

        let metrics = DashboardMetrics::compute(&rows);

        assert_eq!(metrics.item_count, 3);
        assert_eq!(metrics.distinct_customer_orders, 2);
        assert_eq!(metrics.distinct_models, 2);
        assert_eq!(metrics.pending_count, 1);
        assert_eq!(metrics.total_quantity, 7.0);
        assert_eq!(metrics.value_by_stage[&Stage::Separation], 26.0);
        assert_eq!(metrics.value_by_stage[&Stage::Packaging], 0.0);
        assert_eq!(metrics.count_by_stage[&Stage::Separation], 2);
        assert_eq!(metrics.outstanding_value, 25.0);
        assert_eq!(metrics.delivered_value, 6.0);

        assert_eq!(metrics.product_frequency[0].product_code, "P1");
        assert_eq!(metrics.product_frequency[0].count, 2);
        assert_eq!(metrics.product_frequency[0].model_codes, vec!["M1", "M2"]);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = DashboardMetrics::compute(std::iter::empty());
        assert_eq!(metrics.item_count, 0);
        assert_eq!(metrics.outstanding_value, 0.0);
        assert!(metrics.product_frequency.is_empty());
    }
}

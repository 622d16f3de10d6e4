// ==========================================
// 订单管控系统 - 数量对账拆分器
// ==========================================
// 规则: 放行子单（无来源标记）待生产 > 待放行 > 0 且未标记时拆成两行
//   主单、已有来源的子单、待放行为 0 的子单不拆分（交给判定表）
//   原行: 数量 = 待放行，标记 Released（→ 发运）
//   新行: 数量 = 待生产 - 待放行，待生产 = 差额，待放行置空，
//         标记 Remainder（→ 采购）
// 红线: 已标记的行不再拆分，拆分两次结果不变
// ==========================================

use crate::domain::order::OrderLine;
use crate::domain::types::SplitMark;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuantitySplitter;

impl QuantitySplitter {
    pub fn new() -> Self {
        Self
    }

    /// 是否需要拆分
    pub fn needs_split(&self, line: &OrderLine) -> bool {
        if line.split.is_some() || !line.has_suffix() || !line.origin_is_empty() {
            return false;
        }
        match (line.quantity_to_produce, line.quantity_to_release) {
            (Some(to_produce), Some(to_release)) => {
                to_release > 0.0 && to_produce > to_release
            }
            _ => false,
        }
    }

    /// 拆分单行
    ///
    /// # 返回
    /// - (原行, 差额行)；无需拆分时差额行为 None 且原行不变
    pub fn split_line(&self, mut line: OrderLine) -> (OrderLine, Option<OrderLine>) {
        if !self.needs_split(&line) {
            return (line, None);
        }

        let (to_produce, to_release) = match (line.quantity_to_produce, line.quantity_to_release) {
            (Some(p), Some(r)) => (p, r),
            _ => return (line, None),
        };
        let remainder = to_produce - to_release;

        let mut extra = line.clone();
        extra.quantity = remainder;
        extra.quantity_to_produce = Some(remainder);
        extra.quantity_to_release = None;
        extra.split = Some(SplitMark::Remainder);

        line.quantity = to_release;
        line.split = Some(SplitMark::Released);

        debug!(
            order_id = %line.order_id,
            released = to_release,
            remainder,
            "订单行已拆分"
        );

        (line, Some(extra))
    }

    /// 批量拆分，差额行紧跟在原行之后
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub fn split_batch(&self, rows: Vec<OrderLine>) -> Vec<OrderLine> {
        let mut out = Vec::with_capacity(rows.len());
        for line in rows {
            let (original, extra) = self.split_line(line);
            out.push(original);
            out.extend(extra);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qtp: Option<f64>, qtr: Option<f64>) -> OrderLine {
        let mut line = OrderLine::new("4500-1");
        line.quantity = 10.0;
        line.unit_price = 2.5;
        line.quantity_to_produce = qtp;
        line.quantity_to_release = qtr;
        line
    }

    #[test]
    fn test_split_line_literal_values() {
        let (original, extra) = QuantitySplitter::new().split_line(line(Some(10.0), Some(4.0)));
        let extra = extra.unwrap();

        assert_eq!(original.quantity, 4.0);
        assert_eq!(original.split, Some(SplitMark::Released));
        assert_eq!(original.total_value(), 10.0);

        assert_eq!(extra.quantity, 6.0);
        assert_eq!(extra.quantity_to_produce, Some(6.0));
        assert_eq!(extra.quantity_to_release, None);
        assert_eq!(extra.split, Some(SplitMark::Remainder));
        assert_eq!(extra.order_id, "4500-1");
        assert_eq!(extra.total_value(), 15.0);
    }

    #[test]
    fn test_no_split_when_not_exceeding() {
        let splitter = QuantitySplitter::new();
        assert!(!splitter.needs_split(&line(Some(4.0), Some(4.0))));
        assert!(!splitter.needs_split(&line(Some(3.0), Some(4.0))));
        assert!(!splitter.needs_split(&line(None, Some(4.0))));
        assert!(!splitter.needs_split(&line(Some(10.0), None)));
    }

    #[test]
    fn test_no_split_without_released_quantity() {
        // 纯采购子单不产生数量为 0 的发运行
        let out = QuantitySplitter::new().split_batch(vec![line(Some(10.0), Some(0.0))]);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].split, None);
        assert_eq!(out[0].quantity, 10.0);
    }

    #[test]
    fn test_no_split_for_parent_or_origin_rows() {
        let splitter = QuantitySplitter::new();

        let mut parent = line(Some(10.0), Some(4.0));
        parent.order_id = "4500".to_string();
        assert!(!splitter.needs_split(&parent));

        let mut assigned = line(Some(10.0), Some(4.0));
        assigned.origin = Some("OE 77".to_string());
        assert!(!splitter.needs_split(&assigned));

        assigned.origin = Some("  ".to_string());
        assert!(splitter.needs_split(&assigned));
    }

    #[test]
    fn test_split_batch_keeps_remainder_adjacent() {
        let rows = vec![
            line(Some(10.0), Some(4.0)),
            OrderLine::new("4600"),
        ];

        let out = QuantitySplitter::new().split_batch(rows);

        assert_eq!(out.len(), 3);
        assert_eq!(out[1].split, Some(SplitMark::Remainder));
        assert_eq!(out[2].order_id, "4600");
    }

    #[test]
    fn test_split_batch_is_idempotent() {
        let splitter = QuantitySplitter::new();
        let once = splitter.split_batch(vec![line(Some(10.0), Some(4.0)), line(Some(3.0), Some(1.0))]);
        let twice = splitter.split_batch(once.clone());

        assert_eq!(once.len(), 4);
        assert_eq!(once, twice);
    }
}

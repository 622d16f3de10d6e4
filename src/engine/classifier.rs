// ==========================================
// 订单管控系统 - 工序判定引擎
// ==========================================
// 红线: 规则按顺序匹配，先命中者生效
// 红线: 判定表是全函数，任何一行都不会落空
// ==========================================
// 判定顺序:
//   1. 主单: 有放行子单 → 发运，否则 → 分拣
//   2. 子单: 有来源 → 未生成工单
//            拆分标记 → 发运 / 采购（拆分器已决定工序）
//            已生产 > 0 → 发运
//            待生产为空或 0 → 未生成工单
//            待放行 > 0 → 包装
//            其余 → 采购
// ==========================================

use crate::domain::order::OrderLine;
use crate::domain::types::{SplitMark, Stage, StageRule};
use crate::engine::sibling_index::SiblingIndex;

fn positive(value: Option<f64>) -> bool {
    value.map(|v| v > 0.0).unwrap_or(false)
}

/// 子单数量矩阵（已生产 × 待放行）
///
/// | 已生产 | 待放行 | 工序 |
/// |---|---|---|
/// | 0  | 0  | 采购 |
/// | 0  | >0 | 包装 |
/// | >0 | >0 | 发运 |
/// | >0 | 0  | 发运 |
pub fn matrix_stage(quantity_produced: f64, quantity_to_release: f64) -> Stage {
    match (quantity_produced > 0.0, quantity_to_release > 0.0) {
        (true, _) => Stage::Shipping,
        (false, true) => Stage::Packaging,
        (false, false) => Stage::Purchasing,
    }
}

// ==========================================
// StageClassifier - 工序判定
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct StageClassifier;

impl StageClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 判定单行工序，返回命中的规则
    pub fn classify(&self, line: &OrderLine, siblings: &SiblingIndex) -> StageRule {
        if !line.has_suffix() {
            return if siblings.has_suffixed_sibling(line.base_id()) {
                StageRule::ParentWithRelease
            } else {
                StageRule::ParentWithoutRelease
            };
        }

        self.classify_release(line)
    }

    fn classify_release(&self, line: &OrderLine) -> StageRule {
        if !line.origin_is_empty() {
            return StageRule::OriginAssigned;
        }

        // 拆分标记只覆盖数量矩阵的结果
        match line.split {
            Some(SplitMark::Released) => return StageRule::SplitReleased,
            Some(SplitMark::Remainder) => return StageRule::SplitRemainder,
            None => {}
        }

        if positive(line.quantity_produced) {
            return StageRule::Produced;
        }

        match line.quantity_to_produce {
            None => return StageRule::NoProductionOrder,
            Some(v) if v == 0.0 => return StageRule::NoProductionOrder,
            Some(_) => {}
        }

        if positive(line.quantity_to_release) {
            StageRule::AwaitingPackaging
        } else {
            StageRule::AwaitingPurchase
        }
    }
}

// ==========================================
// 订单管控系统 - 分类流水线
// ==========================================
// 流程: 拆分 → 构建子单索引 → 工序判定 → 交付状态
// 红线: 纯函数，不持有全局状态；每次交互整体重算
// ==========================================

use crate::config::LoaderConfigReader;
use crate::domain::order::{ClassifiedOrder, OrderLine};
use crate::domain::types::{DeliveryStatus, Stage, StageRule};
use crate::engine::classifier::StageClassifier;
use crate::engine::sibling_index::SiblingIndex;
use crate::engine::splitter::QuantitySplitter;
use crate::engine::status::{StatusDeriver, DEFAULT_ORDER_DATE_GRACE_DAYS};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::{info, instrument};

// ==========================================
// PipelineOptions - 流水线参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub split_enabled: bool,
    pub order_date_grace_days: i64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            split_enabled: true,
            order_date_grace_days: DEFAULT_ORDER_DATE_GRACE_DAYS,
        }
    }
}

impl PipelineOptions {
    pub fn from_config<C: LoaderConfigReader>(config: &C) -> Self {
        Self {
            split_enabled: config.split_enabled(),
            order_date_grace_days: config.order_date_grace_days(),
        }
    }

    pub fn status_deriver(&self) -> StatusDeriver {
        StatusDeriver::new(self.order_date_grace_days)
    }
}

// ==========================================
// ClassifiedRows - 分类结果集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedRows {
    rows: Vec<ClassifiedOrder>,
}

impl ClassifiedRows {
    pub fn new(rows: Vec<ClassifiedOrder>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifiedOrder> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[ClassifiedOrder] {
        &self.rows
    }

    pub fn into_vec(self) -> Vec<ClassifiedOrder> {
        self.rows
    }

    /// 某一工序的全部行（保持原顺序）
    pub fn by_stage(&self, stage: Stage) -> Vec<&ClassifiedOrder> {
        self.rows.iter().filter(|r| r.stage == stage).collect()
    }

    /// 各工序行数（未出现的工序计 0）
    pub fn stage_counts(&self) -> BTreeMap<Stage, usize> {
        let mut counts: BTreeMap<Stage, usize> = Stage::ALL.iter().map(|s| (*s, 0)).collect();
        for row in &self.rows {
            *counts.entry(row.stage).or_insert(0) += 1;
        }
        counts
    }

    pub fn status_counts(&self) -> BTreeMap<DeliveryStatus, usize> {
        let mut counts: BTreeMap<DeliveryStatus, usize> =
            DeliveryStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for row in &self.rows {
            *counts.entry(row.status).or_insert(0) += 1;
        }
        counts
    }

    /// 各规则命中次数（按规则代码排序）
    pub fn rule_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.stage_rule.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// 取出底层订单行（用于二次运行）
    pub fn lines(&self) -> Vec<OrderLine> {
        self.rows.iter().map(|r| r.line.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a ClassifiedRows {
    type Item = &'a ClassifiedOrder;
    type IntoIter = std::slice::Iter<'a, ClassifiedOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ClassifiedRows {
    type Item = ClassifiedOrder;
    type IntoIter = std::vec::IntoIter<ClassifiedOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// 流水线入口
///
/// # 参数
/// - rows: 加载器输出的订单行
/// - now: 当前时间（状态判定基准）
/// - options: 拆分开关与宽限天数
#[instrument(skip(rows, options), fields(count = rows.len()))]
pub fn classify_and_score(
    rows: Vec<OrderLine>,
    now: NaiveDateTime,
    options: &PipelineOptions,
) -> ClassifiedRows {
    let rows = if options.split_enabled {
        QuantitySplitter::new().split_batch(rows)
    } else {
        rows
    };

    let siblings = SiblingIndex::build(&rows);
    let classifier = StageClassifier::new();
    let deriver = options.status_deriver();

    let classified: Vec<ClassifiedOrder> = rows
        .into_iter()
        .map(|line| {
            let stage_rule = classifier.classify(&line, &siblings);
            let status = deriver.derive(&line, now);
            ClassifiedOrder {
                stage: stage_rule.stage(),
                stage_rule,
                status,
                line,
            }
        })
        .collect();

    let result = ClassifiedRows::new(classified);
    info!(
        classified = result.len(),
        stages = ?result.stage_counts(),
        "分类流水线完成"
    );
    result
}

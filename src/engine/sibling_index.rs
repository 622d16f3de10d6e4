// ==========================================
// 订单管控系统 - 子单索引
// ==========================================
// 职责: 预先记录哪些主单号存在放行子单
// 红线: 每次加载只构建一次，线性时间，禁止逐行扫描全表
// ==========================================

use crate::domain::order::OrderLine;
use std::collections::HashSet;

/// base_id → 是否存在带后缀的子单
#[derive(Debug, Clone, Default)]
pub struct SiblingIndex {
    with_release: HashSet<String>,
}

impl SiblingIndex {
    pub fn build(rows: &[OrderLine]) -> Self {
        let with_release = rows
            .iter()
            .filter(|line| line.has_suffix())
            .map(|line| line.base_id().to_string())
            .collect();
        Self { with_release }
    }

    /// 主单号是否存在放行子单
    pub fn has_suffixed_sibling(&self, base_id: &str) -> bool {
        self.with_release.contains(base_id)
    }

    pub fn len(&self) -> usize {
        self.with_release.len()
    }

    pub fn is_empty(&self) -> bool {
        self.with_release.is_empty()
    }
}

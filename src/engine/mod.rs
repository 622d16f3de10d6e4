// ==========================================
// 订单管控系统 - 引擎层
// ==========================================
// 职责: 拆分、工序判定、交付状态，全部为纯计算
// 红线: 所有判定必须输出规则原因
// ==========================================

pub mod classifier;
pub mod pipeline;
pub mod sibling_index;
pub mod splitter;
pub mod status;

// 重导出核心引擎
pub use classifier::{matrix_stage, StageClassifier};
pub use pipeline::{classify_and_score, ClassifiedRows, PipelineOptions};
pub use sibling_index::SiblingIndex;
pub use splitter::QuantitySplitter;
pub use status::{StatusDeriver, DEFAULT_ORDER_DATE_GRACE_DAYS};

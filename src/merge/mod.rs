// ==========================================
// 订单管控系统 - 表格合并工具
// ==========================================
// 职责: 订单表与补货表按 (Ped. Cliente, Modelo, Produto) 外连接
// 定位: 一次性批处理，失败即中止
// ==========================================

pub mod dataset_merger;
pub mod error;

pub use dataset_merger::{run_merge, DatasetMerger, MergeSummary};
pub use error::{MergeError, MergeResult};

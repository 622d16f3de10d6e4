// ==========================================
// 订单管控系统 - 领域模型层
// ==========================================
// 职责: 定义订单行、工序、交付状态等领域类型
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod columns;
pub mod order;
pub mod types;

// 重导出核心类型
pub use order::{
    split_order_id, ClassifiedOrder, CoercionWarning, DropReason, DroppedRow, LoadReport,
    OrderLine, RawOrderRecord,
};
pub use types::{DeliveryStatus, SplitMark, Stage, StageRule};

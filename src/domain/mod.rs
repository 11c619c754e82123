// ==========================================
// 铸造排产系统 - 领域层
// ==========================================
// 职责: 实体定义与共享类型, 不含业务规则
// ==========================================

pub mod calendar;
pub mod order;
pub mod plan;
pub mod types;

// 重导出领域实体
pub use calendar::{OccupancyRecord, ResourceCalendar};
pub use order::{CastingOrder, PartProfile};
pub use plan::{OrderFailure, PlacementResult, RunResult};

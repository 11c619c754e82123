// ==========================================
// 铸造排产系统 - 引擎层
// ==========================================
// 职责: 实现排产业务规则, 不做 I/O
// 红线: 资源约束优先于订单优先级; 所有失败必须输出 reason
// ==========================================

pub mod accumulator;
pub mod calendar_builder;
pub mod error;
pub mod orchestrator;
pub mod placement;
pub mod ranking;
pub mod timing;

// 重导出核心引擎
pub use accumulator::ResultAccumulator;
pub use calendar_builder::CalendarBuilder;
pub use error::PlanError;
pub use orchestrator::PlanOrchestrator;
pub use placement::{Allocation, PlacementEngine};
pub use ranking::OrderRanker;
pub use timing::{effective_finish_days, LifecycleTiming, TimingCalculator};

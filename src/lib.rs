// ==========================================
// 铸造排产系统 - 核心库
// ==========================================
// 系统定位: 产能约束排产引擎 (纯计算库, 进程内调用)
// 红线: 资源约束优先于订单优先级; 任何资源日余量不得为负
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 产能配置与运行参数
pub mod config;

// API 层 - 异步外观
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FailureReason, PriorityClass, RunStatus};

// 领域实体
pub use domain::{
    CastingOrder, OccupancyRecord, OrderFailure, PartProfile, PlacementResult, ResourceCalendar,
    RunResult,
};

// 配置
pub use config::{CapacityConfig, RunParams, MAX_SEARCH_DAYS_CEILING};

// 引擎
pub use engine::{
    CalendarBuilder, OrderRanker, PlacementEngine, PlanError, PlanOrchestrator, ResultAccumulator,
    TimingCalculator,
};

// API
pub use api::{ApiError, PlannerApi, PlanningDataSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "铸造排产系统";

// ==========================================
// 预编译检查
// ==========================================

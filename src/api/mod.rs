// ==========================================
// 铸造排产系统 - API 层
// ==========================================
// 职责: 异步外观, 供宿主应用在请求路径之外执行排产
// ==========================================

pub mod error;
pub mod planner_api;

pub use error::{ApiError, ApiResult};
pub use planner_api::{PlannerApi, PlanningDataSource};

// ==========================================
// 铸造排产系统 - 配置层
// ==========================================
// 职责: 产能基准配置与运行参数 (内存结构, 持久化由外部协作方负责)
// ==========================================

pub mod capacity_config;
pub mod run_params;

pub use capacity_config::CapacityConfig;
pub use run_params::{RunParams, MAX_SEARCH_DAYS_CEILING};

// ==========================================
// 铸造排产系统 - 引擎层错误类型
// ==========================================
// 职责: 运行级错误 (中止整次排产的条件)
// 红线: 订单级问题不抛错, 记入 RunResult.failures
// ==========================================

use thiserror::Error;

/// 运行级错误
///
/// 仅在整次运行无法开始时返回; 单个订单的主数据/落位问题
/// 一律作为结构化失败记录进入结果文档
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// 搜索窗口超出硬上限 (见 MAX_SEARCH_DAYS_CEILING)
    #[error("搜索窗口超出上限: max_search_days={requested}, ceiling={ceiling}")]
    SearchCeilingExceeded { requested: i64, ceiling: i64 },

    /// 资源日历覆盖天数非正
    #[error("无效的日历覆盖天数: horizon_days={0}")]
    InvalidHorizon(i64),
}

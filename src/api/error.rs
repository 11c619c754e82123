// ==========================================
// 铸造排产系统 - API层错误类型
// ==========================================
// 职责: 聚合数据源错误与运行级错误, 供调用方呈现
// 红线: 订单级问题不在此出现, 它们在 RunResult.failures 中
// ==========================================

use crate::engine::error::PlanError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 数据源加载失败 (订单/主数据/占用/配置)
    #[error("数据源加载失败: {0}")]
    DataSource(#[from] anyhow::Error),

    /// 运行级错误 (整次运行未开始)
    #[error("排产运行被拒绝: {0}")]
    Plan(#[from] PlanError),

    /// 后台任务异常终止
    #[error("排产任务异常终止: {0}")]
    TaskFailed(String),
}

/// API层结果类型
pub type ApiResult<T> = Result<T, ApiError>;

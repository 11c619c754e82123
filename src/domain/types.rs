// ==========================================
// 铸造排产系统 - 领域类型定义
// ==========================================
// 红线: 订单级失败是数据, 不是异常; 所有失败必须输出 reason
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 优先级类别 (Priority Class)
// ==========================================
// 上游按业务类别赋值, 数值越小越紧急
// 排序键始终使用原始整数 priority, 枚举仅用于解释约定
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityClass {
    Test,   // 试制件
    Urgent, // 紧急
    Normal, // 常规
}

impl PriorityClass {
    /// 类别对应的优先级整数 (越小越紧急)
    pub fn rank(self) -> i32 {
        match self {
            PriorityClass::Test => 0,
            PriorityClass::Urgent => 1,
            PriorityClass::Normal => 2,
        }
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityClass::Test => write!(f, "TEST"),
            PriorityClass::Urgent => write!(f, "URGENT"),
            PriorityClass::Normal => write!(f, "NORMAL"),
        }
    }
}

// ==========================================
// 运行状态 (Run Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与落库文档一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Complete,   // 全部订单完成落位
    Incomplete, // 存在未能落位的订单
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Complete => write!(f, "COMPLETE"),
            RunStatus::Incomplete => write!(f, "INCOMPLETE"),
        }
    }
}

// ==========================================
// 订单级失败原因 (Failure Reason)
// ==========================================
// 订单级失败不中断排产流程, 仅记入 RunResult.failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    /// 主数据缺失或非法 (字段缺失/非正值), 不做默认值兜底
    MissingMasterData { field: String },

    /// 搜索窗口内无可行开工日
    PlacementNotFound { searched_days: i64 },
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::MissingMasterData { field } => {
                write!(f, "主数据缺失: field={}", field)
            }
            FailureReason::PlacementNotFound { searched_days } => {
                write!(f, "无可行排产窗口: searched_days={}", searched_days)
            }
        }
    }
}

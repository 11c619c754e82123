// ==========================================
// 铸造排产系统 - 排产结果领域模型
// ==========================================
// 用途: 单次排产的唯一对外输出, 生成后不可变
// 落库: 由持久化协作方按 generated_at 归档为单文档
// ==========================================

use crate::domain::types::{FailureReason, RunStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

// ==========================================
// PlacementResult - 单订单落位结果
// ==========================================
// 约定: 日序号均相对排产起点 (day 0)
// mold_days/pour_days 使用 BTree 容器保证序列化确定性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub order_id: String,
    pub part_ref: String,

    // ===== 造型/浇注 =====
    pub mold_days: BTreeMap<i64, i64>, // 造型日 -> 当日件数
    pub pour_days: BTreeSet<i64>,      // 浇注日集合

    // ===== 生命周期节点 =====
    pub last_mold_day: i64, // 最后造型日
    pub release_day: i64,   // 砂箱释放日 (落砂完成, 当日起可精整)
    pub completion_day: i64, // 完工日

    // ===== 精整压缩 =====
    pub finish_days_effective: i64, // 实际精整工期 ∈ [min_finish_days, finish_days]
    pub late_days: i64,             // 延期天数 = max(0, completion_day - due_day)
}

impl PlacementResult {
    /// 已落位总件数
    pub fn total_qty(&self) -> i64 {
        self.mold_days.values().sum()
    }

    /// 是否延期
    pub fn is_late(&self) -> bool {
        self.late_days > 0
    }
}

// ==========================================
// OrderFailure - 订单级失败记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFailure {
    pub order_id: String,
    pub reason: FailureReason,
}

// ==========================================
// RunResult - 排产运行结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    // ===== 文档头 =====
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,

    // ===== 结果体 =====
    pub status: RunStatus,
    pub placements: Vec<PlacementResult>,
    pub failures: Vec<OrderFailure>,
}

impl RunResult {
    /// 是否全部订单完成落位
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }

    /// 按订单号查找落位结果
    pub fn placement_for(&self, order_id: &str) -> Option<&PlacementResult> {
        self.placements.iter().find(|p| p.order_id == order_id)
    }

    /// 按订单号查找失败记录
    pub fn failure_for(&self, order_id: &str) -> Option<&OrderFailure> {
        self.failures.iter().find(|f| f.order_id == order_id)
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_qty_sums_mold_days() {
        let mut mold_days = BTreeMap::new();
        mold_days.insert(0, 4);
        mold_days.insert(1, 4);
        mold_days.insert(2, 2);

        let placement = PlacementResult {
            order_id: "SO-001".to_string(),
            part_ref: "P-100".to_string(),
            mold_days,
            pour_days: BTreeSet::from([1, 2, 3]),
            last_mold_day: 2,
            release_day: 6,
            completion_day: 11,
            finish_days_effective: 5,
            late_days: 0,
        };

        assert_eq!(placement.total_qty(), 10);
        assert!(!placement.is_late());
    }

    #[test]
    fn test_run_result_lookup() {
        let result = RunResult {
            run_id: Uuid::nil(),
            generated_at: Utc::now(),
            status: RunStatus::Incomplete,
            placements: vec![],
            failures: vec![OrderFailure {
                order_id: "SO-404".to_string(),
                reason: FailureReason::PlacementNotFound { searched_days: 30 },
            }],
        };

        assert!(!result.is_complete());
        assert!(result.placement_for("SO-404").is_none());
        assert!(result.failure_for("SO-404").is_some());
    }
}

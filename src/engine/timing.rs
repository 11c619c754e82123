// ==========================================
// 铸造排产系统 - 生命周期时序计算
// ==========================================
// 职责: 将分配方案换算为浇注/冷却/释放/精整/完工节点
// 红线: 精整压缩是显式两段计算 (先标准工期, 再条件压缩),
//       不允许散落在各处的分支
// ==========================================

use crate::config::RunParams;
use crate::domain::order::PartProfile;
use crate::engine::placement::Allocation;
use std::collections::BTreeSet;

// ==========================================
// LifecycleTiming - 时序计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleTiming {
    pub pour_days: BTreeSet<i64>,   // 各造型日对应的浇注日
    pub last_mold_day: i64,         // 最后造型日
    pub release_day: i64,           // 砂箱释放日 (当日起可精整)
    pub completion_day: i64,        // 完工日
    pub finish_days_effective: i64, // 实际精整工期
    pub late_days: i64,             // 延期天数
}

// ==========================================
// 精整压缩 (纯函数)
// ==========================================

/// 计算实际精整工期
///
/// 两段式:
/// 1) 标准工期 finish_days 若不越期, 直接采用
/// 2) 越期时压缩: 可用工期 = max(0, due_day - release_day),
///    再按 [min_finish_days, finish_days] 截断
///
/// 先尝试压缩, 再接受延期; 结果恒满足
/// min_finish_days ≤ 返回值 ≤ finish_days
///
/// # 参数
/// - `release_day`: 砂箱释放日
/// - `due_day`: 交期
/// - `finish_days`: 精整标准工期
/// - `min_finish_days`: 精整最短工期
pub fn effective_finish_days(
    release_day: i64,
    due_day: i64,
    finish_days: i64,
    min_finish_days: i64,
) -> i64 {
    let completion_nominal = release_day + finish_days;
    if completion_nominal <= due_day {
        return finish_days;
    }
    let available = (due_day - release_day).max(0);
    available.clamp(min_finish_days, finish_days)
}

// ==========================================
// TimingCalculator - 时序计算引擎
// ==========================================
pub struct TimingCalculator {
    // 无状态引擎, 不需要注入依赖
}

impl TimingCalculator {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 TimingCalculator 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 由分配方案计算生命周期节点
    ///
    /// 节点链:
    /// - last_mold_day = 最后造型日
    /// - pour_day = last_mold_day + pour_lag_days
    /// - release_day = pour_day + cool_days + shakeout_lag_days
    /// - completion_day = release_day + finish_days_effective
    /// - late_days = max(0, completion_day - due_day)
    ///
    /// # 参数
    /// - `allocation`: 分配方案 (非空)
    /// - `profile`: 零件工艺主数据
    /// - `due_day`: 交期
    /// - `params`: 运行参数
    pub fn calculate(
        &self,
        allocation: &Allocation,
        profile: &PartProfile,
        due_day: i64,
        params: &RunParams,
    ) -> LifecycleTiming {
        debug_assert!(!allocation.mold_days.is_empty());

        let cool_days = profile.cool_days();

        let pour_days: BTreeSet<i64> = allocation
            .mold_days
            .keys()
            .map(|&d| params.pour_day_of(d))
            .collect();

        let last_mold_day = allocation
            .mold_days
            .keys()
            .next_back()
            .copied()
            .unwrap_or(allocation.start_day);

        let release_day = params.release_day_of(last_mold_day, cool_days);

        let finish_days_effective = effective_finish_days(
            release_day,
            due_day,
            profile.finish_days,
            profile.min_finish_days,
        );
        let completion_day = release_day + finish_days_effective;
        let late_days = (completion_day - due_day).max(0);

        LifecycleTiming {
            pour_days,
            last_mold_day,
            release_day,
            completion_day,
            finish_days_effective,
            late_days,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for TimingCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 铸造排产系统 - 结果累积引擎
// ==========================================
// 职责: 将已接受的落位扣减到资源日历, 并组装 PlacementResult
// 红线: 扣减必须在处理下一订单之前生效 (贪心序贯依赖);
//       扣减后任何资源日余量不得为负
// ==========================================

use crate::config::RunParams;
use crate::domain::calendar::ResourceCalendar;
use crate::domain::order::{CastingOrder, PartProfile};
use crate::domain::plan::PlacementResult;
use crate::engine::placement::Allocation;
use crate::engine::timing::LifecycleTiming;
use tracing::instrument;

// ==========================================
// ResultAccumulator - 结果累积引擎
// ==========================================
pub struct ResultAccumulator {
    // 无状态引擎, 不需要注入依赖
}

impl ResultAccumulator {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 ResultAccumulator 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 应用落位并组装结果
    ///
    /// 对每个造型日 d:
    /// - molding[d] / same_item[d] 扣减当日件数
    /// - pour_tons[d + pour_lag] 扣减当日吨位
    /// - 砂箱余量在 [d, release_day(d)) 内扣减当日箱数
    ///
    /// 搜索阶段已保证可行性, 此处扣减不应产生负值
    /// (浮点吨位截断到 0, 防止累积误差)
    ///
    /// # 参数
    /// - `order`: 订单
    /// - `profile`: 零件工艺主数据
    /// - `allocation`: 已接受的分配方案
    /// - `timing`: 时序计算结果
    /// - `params`: 运行参数
    /// - `calendar`: 资源日历 (就地扣减)
    ///
    /// # 返回
    /// 组装好的 PlacementResult
    #[instrument(skip_all, fields(
        order_id = %order.order_id,
        start_day = allocation.start_day,
        qty = order.remaining_qty
    ))]
    pub fn apply(
        &self,
        order: &CastingOrder,
        profile: &PartProfile,
        allocation: &Allocation,
        timing: &LifecycleTiming,
        params: &RunParams,
        calendar: &mut ResourceCalendar,
    ) -> PlacementResult {
        let cool_days = profile.cool_days();

        for (&day, &qty) in &allocation.mold_days {
            let d = day as usize;

            // 件数类扣减
            calendar.molding[d] -= qty;
            calendar.same_item[d] -= qty;
            debug_assert!(calendar.molding[d] >= 0, "造型余量为负: day={}", day);
            debug_assert!(calendar.same_item[d] >= 0, "同品种余量为负: day={}", day);

            // 浇注吨位扣减 (越过日历末端的浇注日在搜索阶段已排除)
            let pour_day = params.pour_day_of(day);
            if calendar.contains_day(pour_day) {
                let pd = pour_day as usize;
                calendar.pour_tons[pd] -= (qty as f64) * profile.metal_per_unit;
                debug_assert!(
                    calendar.pour_tons[pd] > -1e-6,
                    "浇注吨位为负: day={}",
                    pour_day
                );
                calendar.pour_tons[pd] = calendar.pour_tons[pd].max(0.0);
            }

            // 砂箱窗口扣减: [day, release_day), 日历末端截断
            let molds = profile.molds_for(qty);
            let release = params.release_day_of(day, cool_days);
            let window_end = release.min(calendar.horizon_days);
            if let Some(row) = calendar.flask.get_mut(&profile.flask_type) {
                for x in day..window_end {
                    row[x as usize] -= molds;
                    debug_assert!(row[x as usize] >= 0, "砂箱余量为负: day={}", x);
                }
            }
        }

        PlacementResult {
            order_id: order.order_id.clone(),
            part_ref: order.part_ref.clone(),
            mold_days: allocation.mold_days.clone(),
            pour_days: timing.pour_days.clone(),
            last_mold_day: timing.last_mold_day,
            release_day: timing.release_day,
            completion_day: timing.completion_day,
            finish_days_effective: timing.finish_days_effective,
            late_days: timing.late_days,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for ResultAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

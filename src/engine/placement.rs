// ==========================================
// 铸造排产系统 - 落位搜索引擎
// ==========================================
// 职责: 为单个订单寻找最早可行开工日 (earliest-feasible, 非代价最优)
// 输入: 订单数量 + 零件工艺主数据 + 当前资源日历 (可能已被前序订单扣减)
// 输出: 完整分配方案 (全量落位) 或失败
// ==========================================
// 红线: 要么全量落位, 要么整单失败, 不允许部分落位
// ==========================================

use crate::config::RunParams;
use crate::domain::calendar::ResourceCalendar;
use crate::domain::order::PartProfile;
use std::collections::BTreeMap;
use tracing::{instrument, trace};

/// 浇注吨位换算件数时的浮点容差
const POUR_EPS: f64 = 1e-9;

// ==========================================
// Allocation - 分配方案
// ==========================================
// 一次可行的全量落位: 各造型日的件数分配
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub start_day: i64,                // 开工日 (首个造型日)
    pub mold_days: BTreeMap<i64, i64>, // 造型日 -> 当日件数
}

// ==========================================
// PlacementEngine - 落位搜索引擎
// ==========================================
pub struct PlacementEngine {
    // 无状态引擎, 不需要注入依赖
}

impl PlacementEngine {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 PlacementEngine 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 搜索最早可行开工日
    ///
    /// 依次尝试 k = 0, 1, ..., max_search_days-1, 接受首个
    /// 能将 qty 全量落位的开工日 (最早可行, 不做代价比较)
    ///
    /// # 参数
    /// - `qty`: 待落位件数 (>0)
    /// - `profile`: 零件工艺主数据 (调用方已校验)
    /// - `calendar`: 当前资源日历 (只读; 前序订单的扣减已生效)
    /// - `params`: 运行参数
    ///
    /// # 返回
    /// - `Some(Allocation)`: 首个可行方案
    /// - `None`: 搜索窗口内无可行开工日
    #[instrument(skip(self, profile, calendar, params), fields(
        qty = qty,
        flask_type = %profile.flask_type,
        max_search_days = params.max_search_days
    ))]
    pub fn find_earliest(
        &self,
        qty: i64,
        profile: &PartProfile,
        calendar: &ResourceCalendar,
        params: &RunParams,
    ) -> Option<Allocation> {
        // 开工日超出日历范围没有意义
        let search_end = params.max_search_days.min(calendar.horizon_days);

        for start_day in 0..search_end {
            if let Some(allocation) =
                self.try_allocate_at(start_day, qty, profile, calendar, params)
            {
                trace!(start_day, "找到可行开工日");
                return Some(allocation);
            }
        }
        None
    }

    /// 评估指定开工日的可行性
    ///
    /// 从 start_day 起逐日分配, 每日可落位件数受四类约束的最小值限制:
    /// 1) 造型余量 molding[d]
    /// 2) 同品种余量 same_item[d]
    /// 3) 浇注吨位: qty × metal_per_unit ≤ pour_tons[d + pour_lag]
    /// 4) 砂箱窗口: 当日开工的砂箱在 [d, release_day) 内持续占用,
    ///    可用箱数取整个窗口内余量的最小值 (窗口最小值判定)
    ///
    /// 砂箱余量在本订单内部使用草稿行模拟扣减: 先造型的箱子在
    /// 后续天仍被本订单占用, 必须对后续天可见
    ///
    /// 连续性: allow_gaps=false 时任一天无可落位件数即整个候选
    /// 开工日作废; allow_gaps=true 时跳过无余量的天继续分配
    ///
    /// # 返回
    /// - `Some(Allocation)`: 该开工日可全量落位
    /// - `None`: 该开工日不可行
    pub fn try_allocate_at(
        &self,
        start_day: i64,
        qty: i64,
        profile: &PartProfile,
        calendar: &ResourceCalendar,
        params: &RunParams,
    ) -> Option<Allocation> {
        if qty <= 0 || !calendar.contains_day(start_day) {
            return None;
        }

        let cool_days = profile.cool_days();
        let mut flask_scratch = calendar.flask_row_scratch(&profile.flask_type);

        let mut remaining = qty;
        let mut mold_days: BTreeMap<i64, i64> = BTreeMap::new();
        let mut day = start_day;

        while remaining > 0 {
            // 分配越过日历末端 => 该开工日不可行
            if !calendar.contains_day(day) {
                return None;
            }

            let cap = self.day_capacity(day, profile, cool_days, calendar, &flask_scratch, params);

            if cap <= 0 {
                if params.allow_gaps {
                    day += 1;
                    continue;
                }
                // 连续性要求: 中断即整个候选开工日作废
                return None;
            }

            let take = remaining.min(cap);

            // 草稿行扣减: 本日开工的砂箱占用整个锁定窗口
            let molds = profile.molds_for(take);
            let release = params.release_day_of(day, cool_days);
            let window_end = release.min(calendar.horizon_days);
            for x in day..window_end {
                flask_scratch[x as usize] -= molds;
            }

            mold_days.insert(day, take);
            remaining -= take;
            day += 1;
        }

        Some(Allocation {
            start_day,
            mold_days,
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 计算某日可落位件数上限 (四类约束的最小值)
    fn day_capacity(
        &self,
        day: i64,
        profile: &PartProfile,
        cool_days: i64,
        calendar: &ResourceCalendar,
        flask_scratch: &[i64],
        params: &RunParams,
    ) -> i64 {
        let molding = calendar.molding[day as usize];
        let same_item = calendar.same_item[day as usize];

        // 浇注约束: 浇注日吨位换算为件数上限
        let pour_day = params.pour_day_of(day);
        let pour_cap = if calendar.contains_day(pour_day) {
            ((calendar.pour_tons[pour_day as usize] / profile.metal_per_unit) + POUR_EPS).floor()
                as i64
        } else {
            // 浇注日越过日历末端视为无吨位
            0
        };

        // 砂箱窗口约束: [day, release) 内草稿余量的最小值
        // 日历末端之外不设约束 (日历仅覆盖 [0, horizon))
        let release = params.release_day_of(day, cool_days);
        let window_end = release.min(calendar.horizon_days);
        let flask_min = (day..window_end)
            .map(|x| flask_scratch[x as usize])
            .min()
            .unwrap_or(i64::MAX);
        let flask_cap = flask_min.saturating_mul(profile.pieces_per_mold);

        molding.min(same_item).min(pour_cap).min(flask_cap).max(0)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    /// 创建均匀余量的测试日历
    fn uniform_calendar(
        horizon: i64,
        molding: i64,
        same_item: i64,
        pour_tons: f64,
        flasks: &[(&str, i64)],
    ) -> ResourceCalendar {
        let h = horizon as usize;
        ResourceCalendar {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            horizon_days: horizon,
            molding: vec![molding; h],
            same_item: vec![same_item; h],
            pour_tons: vec![pour_tons; h],
            flask: flasks
                .iter()
                .map(|(t, n)| (t.to_string(), vec![*n; h]))
                .collect(),
        }
    }

    fn profile(flask_type: &str, cool_hours: f64, pieces_per_mold: i64) -> PartProfile {
        PartProfile {
            flask_type: flask_type.to_string(),
            cool_hours,
            finish_days: 5,
            min_finish_days: 2,
            pieces_per_mold,
            metal_per_unit: 0.5,
        }
    }

    #[test]
    fn test_spread_over_consecutive_days() {
        // 测试: 同品种日上限 4, 10 件分摊为 {0:4, 1:4, 2:2}
        let engine = PlacementEngine::new();
        let calendar = uniform_calendar(30, 100, 4, 1000.0, &[("S", 50)]);
        let params = RunParams::default();

        let allocation = engine
            .find_earliest(10, &profile("S", 24.0, 4), &calendar, &params)
            .unwrap();

        assert_eq!(allocation.start_day, 0);
        assert_eq!(
            allocation.mold_days,
            BTreeMap::from([(0, 4), (1, 4), (2, 2)])
        );
    }

    #[test]
    fn test_flask_window_minimum_blocks_start() {
        // 测试: 砂箱窗口最小值判定 - 窗口中段被占用时整个开工日不可行
        let engine = PlacementEngine::new();
        let mut calendar = uniform_calendar(30, 10, 10, 1000.0, &[("S", 1)]);
        // day 2 被既有占用耗尽; 开工日 0 的窗口 [0,4) 覆盖 day 2
        calendar.flask.get_mut("S").unwrap()[2] = 0;
        let params = RunParams::default(); // pour_lag=1, shakeout=1

        let p = profile("S", 48.0, 1); // cool_days=2, 窗口 4 天

        // 开工日 0..2 的窗口都覆盖 day 2, 均不可行
        assert!(engine.try_allocate_at(0, 1, &p, &calendar, &params).is_none());
        assert!(engine.try_allocate_at(1, 1, &p, &calendar, &params).is_none());
        assert!(engine.try_allocate_at(2, 1, &p, &calendar, &params).is_none());

        // day 3 起窗口 [3,7) 不再覆盖 day 2
        let allocation = engine.find_earliest(1, &p, &calendar, &params).unwrap();
        assert_eq!(allocation.start_day, 3);
    }

    #[test]
    fn test_intra_order_flask_overlap() {
        // 测试: 同一订单先造型的砂箱对后续天可见
        // 台账 1 箱, 每箱 1 件, 需 2 件: day 0 造型后 day 1 无箱可用,
        // 连续性要求下任何开工日都不可行
        let engine = PlacementEngine::new();
        let calendar = uniform_calendar(30, 10, 10, 1000.0, &[("S", 1)]);
        let params = RunParams::default();
        let p = profile("S", 48.0, 1);

        assert!(engine.find_earliest(2, &p, &calendar, &params).is_none());

        // allow_gaps=true 时跳过无箱的天, 在释放日继续
        let gap_params = RunParams {
            allow_gaps: true,
            ..RunParams::default()
        };
        let allocation = engine.find_earliest(2, &p, &calendar, &gap_params).unwrap();
        assert_eq!(
            allocation.mold_days,
            BTreeMap::from([(0, 1), (4, 1)]) // 释放日 = 0+1+2+1 = 4
        );
    }

    #[test]
    fn test_pour_tonnage_bounds_daily_qty() {
        // 测试: 浇注吨位限制当日件数
        let engine = PlacementEngine::new();
        let calendar = uniform_calendar(30, 100, 100, 1.0, &[("S", 50)]);
        let params = RunParams::default();
        let p = profile("S", 24.0, 10); // metal_per_unit=0.5 => 每日最多 2 件

        let allocation = engine.find_earliest(5, &p, &calendar, &params).unwrap();
        assert_eq!(
            allocation.mold_days,
            BTreeMap::from([(0, 2), (1, 2), (2, 1)])
        );
    }

    #[test]
    fn test_contiguity_rejects_broken_run() {
        // 测试: allow_gaps=false 时中断日导致候选开工日作废
        let engine = PlacementEngine::new();
        let mut calendar = uniform_calendar(30, 4, 4, 1000.0, &[("S", 50)]);
        calendar.molding[1] = 0; // day 1 无造型能力
        let params = RunParams::default();
        let p = profile("S", 24.0, 4);

        // 开工日 0 需要连续 2 天, day 1 中断 => 推至 day 2
        let allocation = engine.find_earliest(8, &p, &calendar, &params).unwrap();
        assert_eq!(allocation.start_day, 2);
        assert_eq!(allocation.mold_days, BTreeMap::from([(2, 4), (3, 4)]));
    }

    #[test]
    fn test_no_feasible_window() {
        // 测试: 搜索窗口内无可行开工日
        let engine = PlacementEngine::new();
        let calendar = uniform_calendar(30, 0, 4, 1000.0, &[("S", 50)]);
        let params = RunParams::default();

        assert!(engine
            .find_earliest(1, &profile("S", 24.0, 4), &calendar, &params)
            .is_none());
    }

    #[test]
    fn test_unknown_flask_type_never_places() {
        // 未建档砂箱型号余量按 0 处理
        let engine = PlacementEngine::new();
        let calendar = uniform_calendar(30, 10, 10, 1000.0, &[("S", 50)]);
        let params = RunParams::default();

        assert!(engine
            .find_earliest(1, &profile("XL", 24.0, 4), &calendar, &params)
            .is_none());
    }

    #[test]
    fn test_search_window_respected() {
        // 测试: max_search_days 限制搜索范围
        let engine = PlacementEngine::new();
        let mut calendar = uniform_calendar(30, 10, 10, 1000.0, &[("S", 50)]);
        for d in 0..5 {
            calendar.molding[d] = 0;
        }
        let p = profile("S", 24.0, 4);

        let narrow = RunParams {
            max_search_days: 5,
            ..RunParams::default()
        };
        assert!(engine.find_earliest(1, &p, &calendar, &narrow).is_none());

        let wide = RunParams {
            max_search_days: 10,
            ..RunParams::default()
        };
        let allocation = engine.find_earliest(1, &p, &calendar, &wide).unwrap();
        assert_eq!(allocation.start_day, 5);
    }

    #[test]
    fn test_pieces_per_mold_scales_flask_cap() {
        // 测试: 每箱多件时砂箱约束按件数折算
        let engine = PlacementEngine::new();
        let calendar = uniform_calendar(30, 100, 100, 1000.0, &[("M", 2)]);
        let params = RunParams::default();
        let p = PartProfile {
            flask_type: "M".to_string(),
            cool_hours: 24.0,
            finish_days: 5,
            min_finish_days: 2,
            pieces_per_mold: 3,
            metal_per_unit: 0.1,
        };

        // 2 箱 × 3 件 = 每日最多 6 件 (窗口内)
        let allocation = engine.try_allocate_at(0, 6, &p, &calendar, &params).unwrap();
        assert_eq!(allocation.mold_days, BTreeMap::from([(0, 6)]));
    }
}

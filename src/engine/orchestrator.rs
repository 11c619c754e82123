// ==========================================
// 铸造排产系统 - 引擎编排器
// ==========================================
// 用途: 协调日历构建/排序/落位搜索/时序计算/结果累积的执行顺序
// ==========================================
// 序贯契约: 每个被接受的落位在处理下一订单之前扣减到资源日历,
// 后序订单看到的是已扣减后的余量 (贪心启发式的正确性依赖于此)
// ==========================================

use crate::config::{CapacityConfig, RunParams};
use crate::domain::calendar::{OccupancyRecord, ResourceCalendar};
use crate::domain::order::{CastingOrder, PartProfile};
use crate::domain::plan::{OrderFailure, PlacementResult, RunResult};
use crate::domain::types::{FailureReason, RunStatus};
use crate::engine::error::PlanError;
use crate::engine::{
    CalendarBuilder, OrderRanker, PlacementEngine, ResultAccumulator, TimingCalculator,
};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// PlanOrchestrator - 引擎编排器
// ==========================================

pub struct PlanOrchestrator {
    builder: CalendarBuilder,
    ranker: OrderRanker,
    placement: PlacementEngine,
    timing: TimingCalculator,
    accumulator: ResultAccumulator,
}

impl PlanOrchestrator {
    /// 创建新的编排器实例
    pub fn new() -> Self {
        Self {
            builder: CalendarBuilder::new(),
            ranker: OrderRanker::new(),
            placement: PlacementEngine::new(),
            timing: TimingCalculator::new(),
            accumulator: ResultAccumulator::new(),
        }
    }

    /// 执行完整排产流程
    ///
    /// 单线程同步批计算: 一次运行处理一份排序订单列表,
    /// 对一份独占的资源日历就地扣减, 无内部并发, 无 I/O,
    /// 相同输入产生相同结果 (run_id/generated_at 文档头除外)
    ///
    /// # 参数
    /// - `orders`: 待排产订单列表
    /// - `profiles`: 零件工艺主数据 (按 part_ref 索引)
    /// - `occupancy`: 既有砂箱占用记录
    /// - `capacity_config`: 产能基准配置
    /// - `params`: 运行参数
    /// - `start_date`: 排产起点日期 (day 0)
    ///
    /// # 返回
    /// - `Ok(RunResult)`: 排产结果 (订单级失败记入 failures)
    /// - `Err(PlanError)`: 运行级错误, 整次运行未开始
    #[instrument(skip_all, fields(
        orders_count = orders.len(),
        horizon_days = params.horizon_days,
        max_search_days = params.max_search_days
    ))]
    pub fn execute_run(
        &self,
        orders: Vec<CastingOrder>,
        profiles: &HashMap<String, PartProfile>,
        occupancy: &[OccupancyRecord],
        capacity_config: &CapacityConfig,
        params: &RunParams,
        start_date: NaiveDate,
    ) -> Result<RunResult, PlanError> {
        // ==========================================
        // 步骤0: 运行参数校验 (唯一的整次运行失败点)
        // ==========================================
        params.validate()?;

        info!(
            orders_count = orders.len(),
            start_date = %start_date,
            "开始执行排产流程"
        );

        // ==========================================
        // 步骤1: Calendar Builder - 构建资源日历
        // ==========================================
        debug!("步骤1: 构建资源日历");

        let mut calendar =
            self.builder
                .build(capacity_config, occupancy, start_date, params.horizon_days);

        // ==========================================
        // 步骤2: Order Ranker - 订单排序
        // ==========================================
        debug!("步骤2: 执行订单排序");

        let ranked = self.ranker.sort(orders);

        // ==========================================
        // 步骤3: 逐订单落位 (显式折叠, 日历为累积器)
        // ==========================================
        debug!("步骤3: 逐订单落位");

        let mut placements = Vec::new();
        let mut failures = Vec::new();

        for order in &ranked {
            match self.place_order(order, profiles, &mut calendar, params) {
                Ok(placement) => {
                    debug!(
                        order_id = %order.order_id,
                        start_day = placement.mold_days.keys().next().copied().unwrap_or(0),
                        completion_day = placement.completion_day,
                        late_days = placement.late_days,
                        "订单落位完成"
                    );
                    placements.push(placement);
                }
                Err(reason) => {
                    warn!(order_id = %order.order_id, reason = %reason, "订单未能落位");
                    failures.push(OrderFailure {
                        order_id: order.order_id.clone(),
                        reason,
                    });
                }
            }
        }

        // ==========================================
        // 步骤4: 组装运行结果
        // ==========================================

        let status = if failures.is_empty() {
            RunStatus::Complete
        } else {
            RunStatus::Incomplete
        };

        info!(
            placed_count = placements.len(),
            failed_count = failures.len(),
            status = %status,
            "排产流程完成"
        );

        Ok(RunResult {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            status,
            placements,
            failures,
        })
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 处理单个订单: 主数据校验 -> 落位搜索 -> 时序计算 -> 扣减累积
    ///
    /// 要么全量落位并扣减生效, 要么返回失败原因, 日历不被触碰
    fn place_order(
        &self,
        order: &CastingOrder,
        profiles: &HashMap<String, PartProfile>,
        calendar: &mut ResourceCalendar,
        params: &RunParams,
    ) -> Result<PlacementResult, FailureReason> {
        // 主数据校验 (fail-fast, 不做默认值兜底)
        let profile = profiles
            .get(&order.part_ref)
            .ok_or_else(|| FailureReason::MissingMasterData {
                field: "part_profile".to_string(),
            })?;
        profile.validate()?;

        if order.remaining_qty <= 0 {
            return Err(FailureReason::MissingMasterData {
                field: "remaining_qty".to_string(),
            });
        }

        // 落位搜索
        let allocation = self
            .placement
            .find_earliest(order.remaining_qty, profile, calendar, params)
            .ok_or(FailureReason::PlacementNotFound {
                searched_days: params.max_search_days,
            })?;

        // 时序计算 + 扣减累积
        let timing = self
            .timing
            .calculate(&allocation, profile, order.due_day, params);

        Ok(self
            .accumulator
            .apply(order, profile, &allocation, &timing, params, calendar))
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PlanOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

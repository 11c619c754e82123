// ==========================================
// 铸造排产系统 - 排产运行 API
// ==========================================
// 职责: 从数据源装载输入, 在阻塞线程池上执行排产,
//       使宿主应用的请求处理保持响应
// ==========================================
// 说明: 引擎本身无挂起点; 并发仅存在于调用方,
//       一份资源日历在运行期间为单次运行独占
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{CapacityConfig, RunParams};
use crate::domain::calendar::OccupancyRecord;
use crate::domain::order::{CastingOrder, PartProfile};
use crate::domain::plan::RunResult;
use crate::engine::PlanOrchestrator;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

// ==========================================
// PlanningDataSource - 排产数据源
// ==========================================

/// 排产输入数据源
///
/// 上游协作方 (ERP 接入/主数据维护) 实现此 trait;
/// 引擎只消费内存结构, 不关心来源
#[async_trait]
pub trait PlanningDataSource: Send + Sync {
    /// 装载待排产订单
    async fn load_orders(&self) -> anyhow::Result<Vec<CastingOrder>>;

    /// 装载零件工艺主数据 (按 part_ref 索引)
    async fn load_part_profiles(&self) -> anyhow::Result<HashMap<String, PartProfile>>;

    /// 装载既有砂箱占用记录
    async fn load_occupancy(&self) -> anyhow::Result<Vec<OccupancyRecord>>;

    /// 装载产能基准配置
    async fn load_capacity_config(&self) -> anyhow::Result<CapacityConfig>;
}

// ==========================================
// PlannerApi - 排产运行 API
// ==========================================

/// 排产运行API
///
/// 职责:
/// 1. 从数据源装载订单/主数据/占用/配置
/// 2. 在 spawn_blocking 上执行同步排产引擎
/// 3. 返回 RunResult (持久化由调用方负责)
pub struct PlannerApi<S>
where
    S: PlanningDataSource + 'static,
{
    source: Arc<S>,
    params: RunParams,
}

impl<S> PlannerApi<S>
where
    S: PlanningDataSource + 'static,
{
    /// 创建新的 PlannerApi 实例
    ///
    /// # 参数
    /// - `source`: 排产数据源
    /// - `params`: 运行参数
    pub fn new(source: Arc<S>, params: RunParams) -> Self {
        Self { source, params }
    }

    /// 执行一次排产运行
    ///
    /// # 参数
    /// - `start_date`: 排产起点日期 (day 0)
    ///
    /// # 返回
    /// - `Ok(RunResult)`: 排产结果
    /// - `Err(ApiError)`: 数据源失败或运行级错误
    pub async fn run_plan(&self, start_date: NaiveDate) -> ApiResult<RunResult> {
        let orders = self.source.load_orders().await?;
        let profiles = self.source.load_part_profiles().await?;
        let occupancy = self.source.load_occupancy().await?;
        let capacity_config = self.source.load_capacity_config().await?;

        info!(
            orders_count = orders.len(),
            start_date = %start_date,
            "排产输入装载完成"
        );

        let params = self.params.clone();

        // 引擎是纯 CPU 计算, 放到阻塞线程池避免占用异步调度器
        let result = tokio::task::spawn_blocking(move || {
            let orchestrator = PlanOrchestrator::new();
            orchestrator.execute_run(
                orders,
                &profiles,
                &occupancy,
                &capacity_config,
                &params,
                start_date,
            )
        })
        .await
        .map_err(|e| ApiError::TaskFailed(e.to_string()))??;

        Ok(result)
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RunStatus;

    /// 内存数据源 (测试用)
    struct InMemorySource {
        orders: Vec<CastingOrder>,
        profiles: HashMap<String, PartProfile>,
    }

    #[async_trait]
    impl PlanningDataSource for InMemorySource {
        async fn load_orders(&self) -> anyhow::Result<Vec<CastingOrder>> {
            Ok(self.orders.clone())
        }

        async fn load_part_profiles(&self) -> anyhow::Result<HashMap<String, PartProfile>> {
            Ok(self.profiles.clone())
        }

        async fn load_occupancy(&self) -> anyhow::Result<Vec<OccupancyRecord>> {
            Ok(vec![])
        }

        async fn load_capacity_config(&self) -> anyhow::Result<CapacityConfig> {
            Ok(CapacityConfig {
                molding_units_per_day: 50,
                same_item_units_per_day: 20,
                pour_tons_per_day: 100.0,
                weekday_shift_multipliers: [1.0; 7],
                flask_inventory: [("S".to_string(), 10)].into_iter().collect(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_plan_end_to_end() {
        let source = InMemorySource {
            orders: vec![CastingOrder {
                order_id: "SO-1".to_string(),
                part_ref: "P-100".to_string(),
                remaining_qty: 6,
                due_day: 30,
                priority: 1,
            }],
            profiles: [(
                "P-100".to_string(),
                PartProfile {
                    flask_type: "S".to_string(),
                    cool_hours: 24.0,
                    finish_days: 3,
                    min_finish_days: 1,
                    pieces_per_mold: 2,
                    metal_per_unit: 0.5,
                },
            )]
            .into_iter()
            .collect(),
        };

        let api = PlannerApi::new(Arc::new(source), RunParams::default());
        let result = api
            .run_plan(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
            .await
            .unwrap();

        assert_eq!(result.status, RunStatus::Complete);
        assert_eq!(result.placements[0].total_qty(), 6);
    }

    #[tokio::test]
    async fn test_run_plan_rejects_bad_params() {
        let source = InMemorySource {
            orders: vec![],
            profiles: HashMap::new(),
        };
        let params = RunParams {
            max_search_days: crate::config::MAX_SEARCH_DAYS_CEILING + 1,
            ..RunParams::default()
        };

        let api = PlannerApi::new(Arc::new(source), params);
        let result = api
            .run_plan(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
            .await;

        assert!(matches!(result, Err(ApiError::Plan(_))));
    }
}

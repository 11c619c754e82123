// ==========================================
// 铸造排产系统 - 资源日历构建引擎
// ==========================================
// 职责: 由产能基准配置 + 既有占用记录生成按天余量数组
// 输入: CapacityConfig + OccupancyRecord 列表 + 起点日期/覆盖天数
// 输出: ResourceCalendar (纯变换, 永不失败, 负值截断为 0)
// ==========================================

use crate::config::CapacityConfig;
use crate::domain::calendar::{OccupancyRecord, ResourceCalendar};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// CalendarBuilder - 资源日历构建引擎
// ==========================================
pub struct CalendarBuilder {
    // 无状态引擎, 不需要注入依赖
}

impl CalendarBuilder {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 CalendarBuilder 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 构建资源日历
    ///
    /// 规则:
    /// 1) 日序号 d 对应日期 start_date + d, 该日期的星期决定班次系数
    /// 2) 件数类产能 = floor(基准 × 系数), 吨位类 = 基准 × 系数
    /// 3) 每条占用记录在 [0, release_day) 内扣减对应型号砂箱余量;
    ///    起始在过去的占用视为从今日 (day 0) 开始
    /// 4) 扣减结果负值截断为 0
    ///
    /// # 参数
    /// - `config`: 产能基准配置
    /// - `occupancy`: 既有占用记录
    /// - `start_date`: 排产起点日期 (day 0)
    /// - `horizon_days`: 覆盖天数
    ///
    /// # 返回
    /// 覆盖 [0, horizon_days) 的资源日历
    #[instrument(skip(self, config, occupancy), fields(
        horizon_days = horizon_days,
        occupancy_count = occupancy.len(),
        flask_types = config.flask_inventory.len()
    ))]
    pub fn build(
        &self,
        config: &CapacityConfig,
        occupancy: &[OccupancyRecord],
        start_date: NaiveDate,
        horizon_days: i64,
    ) -> ResourceCalendar {
        let horizon = horizon_days.max(0) as usize;

        let mut molding = Vec::with_capacity(horizon);
        let mut same_item = Vec::with_capacity(horizon);
        let mut pour_tons = Vec::with_capacity(horizon);

        for d in 0..horizon {
            let weekday = (start_date + Duration::days(d as i64)).weekday();
            molding.push(config.scaled_units(config.molding_units_per_day, weekday));
            same_item.push(config.scaled_units(config.same_item_units_per_day, weekday));
            pour_tons.push(config.scaled_tons(config.pour_tons_per_day, weekday));
        }

        // 砂箱台账铺开为按天余量行
        let mut flask: HashMap<String, Vec<i64>> = HashMap::new();
        for (flask_type, total) in &config.flask_inventory {
            flask.insert(flask_type.clone(), vec![(*total).max(0); horizon]);
        }

        // 既有占用扣减: 占用区间 [0, release_day), 释放日当天已可复用
        for record in occupancy {
            let Some(row) = flask.get_mut(&record.flask_type) else {
                debug!(
                    flask_type = %record.flask_type,
                    "占用记录的砂箱型号未建档, 忽略"
                );
                continue;
            };

            let end = record.release_day.min(horizon as i64);
            for x in 0..end.max(0) {
                row[x as usize] = (row[x as usize] - record.qty).max(0);
            }
        }

        ResourceCalendar {
            start_date,
            horizon_days: horizon as i64,
            molding,
            same_item,
            pour_tons,
            flask,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for CalendarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

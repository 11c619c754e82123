// ==========================================
// 铸造排产系统 - 运行参数
// ==========================================
// 职责: 单次排产的搜索/时序参数与上限校验
// ==========================================

use crate::engine::error::PlanError;
use serde::{Deserialize, Serialize};

/// max_search_days 的硬上限; 超出时拒绝整次运行, 避免无界搜索开销
pub const MAX_SEARCH_DAYS_CEILING: i64 = 3650;

// ==========================================
// RunParams - 运行参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub horizon_days: i64,    // 资源日历覆盖天数
    pub max_search_days: i64, // 开工日搜索窗口 [0, max_search_days)
    pub allow_gaps: bool,     // 是否允许造型日不连续
    pub pour_lag_days: i64,   // 造型 -> 浇注间隔 (工作日)
    pub shakeout_lag_days: i64, // 冷却结束 -> 落砂释放间隔 (工作日)
}

impl RunParams {
    /// 运行前校验
    ///
    /// 这是唯一会中止整次运行的校验; 订单级问题一律记入 failures
    ///
    /// # 返回
    /// - `Err(PlanError::SearchCeilingExceeded)`: 搜索窗口超出硬上限
    /// - `Err(PlanError::InvalidHorizon)`: 日历覆盖天数非正
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.horizon_days <= 0 {
            return Err(PlanError::InvalidHorizon(self.horizon_days));
        }
        if self.max_search_days <= 0 || self.max_search_days > MAX_SEARCH_DAYS_CEILING {
            return Err(PlanError::SearchCeilingExceeded {
                requested: self.max_search_days,
                ceiling: MAX_SEARCH_DAYS_CEILING,
            });
        }
        Ok(())
    }

    /// 造型日 d 对应的浇注日
    pub fn pour_day_of(&self, mold_day: i64) -> i64 {
        mold_day + self.pour_lag_days
    }

    /// 造型日 d 对应的砂箱释放日 (当日起砂箱重新可用)
    ///
    /// 锁定窗口为 [d, release_day), 即砂箱在释放日当天已可复用
    pub fn release_day_of(&self, mold_day: i64, cool_days: i64) -> i64 {
        mold_day + self.pour_lag_days + cool_days + self.shakeout_lag_days
    }
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            horizon_days: 365,
            max_search_days: 365,
            allow_gaps: false,
            pour_lag_days: 1,
            shakeout_lag_days: 1,
        }
    }
}

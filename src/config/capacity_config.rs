// ==========================================
// 铸造排产系统 - 产能基准配置
// ==========================================
// 职责: 每日基准产能 × 周班次系数 + 砂箱台账
// ==========================================

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// CapacityConfig - 产能基准配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    // ===== 每日基准产能 =====
    pub molding_units_per_day: i64,   // 造型能力 (件/天)
    pub same_item_units_per_day: i64, // 同品种上限 (件/天)
    pub pour_tons_per_day: f64,       // 浇注吨位 (吨/天)

    // ===== 周班次系数 (周一..周日) =====
    // 工作日近似: 默认全 1.0, 即日序号算术与星期无关;
    // 需要周末减班时由配置方下调对应系数
    pub weekday_shift_multipliers: [f64; 7],

    // ===== 砂箱台账 (型号 -> 总箱数) =====
    pub flask_inventory: HashMap<String, i64>,
}

impl CapacityConfig {
    /// 某星期对应的班次系数
    pub fn multiplier_for(&self, weekday: Weekday) -> f64 {
        self.weekday_shift_multipliers[weekday.num_days_from_monday() as usize]
    }

    /// 件数类产能按系数折算 (向下取整, 不产生小数件)
    pub fn scaled_units(&self, base: i64, weekday: Weekday) -> i64 {
        ((base as f64) * self.multiplier_for(weekday)).floor().max(0.0) as i64
    }

    /// 吨位类产能按系数折算
    pub fn scaled_tons(&self, base: f64, weekday: Weekday) -> f64 {
        (base * self.multiplier_for(weekday)).max(0.0)
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            molding_units_per_day: 60,
            same_item_units_per_day: 20,
            pour_tons_per_day: 40.0,
            weekday_shift_multipliers: [1.0; 7],
            flask_inventory: HashMap::new(),
        }
    }
}

// ==========================================
// 铸造排产系统 - 资源日历领域模型
// ==========================================
// 红线: 任何资源日余量不得为负
// 用途: 单次排产的唯一可变状态, 按天×资源类型索引
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// OccupancyRecord - 既有占用记录
// ==========================================
// 表示本次排产开始前已被承诺工作锁定的砂箱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub flask_type: String, // 砂箱型号
    pub release_day: i64,   // 释放日 (相对排产起点; 当日起砂箱重新可用)
    pub qty: i64,           // 占用箱数
}

// ==========================================
// ResourceCalendar - 资源日历
// ==========================================
// 每个被接受的落位在此就地扣减, 后续订单看到的是已扣减后的余量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCalendar {
    pub start_date: NaiveDate, // 排产起点日期 (day 0)
    pub horizon_days: i64,     // 覆盖天数, 日序号范围 [0, horizon_days)

    // ===== 按天余量 =====
    pub molding: Vec<i64>,    // 造型余量 (件/天)
    pub same_item: Vec<i64>,  // 同品种余量 (件/天)
    pub pour_tons: Vec<f64>,  // 浇注吨位余量 (吨/天)

    // ===== 砂箱余量 (按型号) =====
    pub flask: HashMap<String, Vec<i64>>,
}

impl ResourceCalendar {
    /// 判断日序号是否落在日历内
    pub fn contains_day(&self, day: i64) -> bool {
        day >= 0 && day < self.horizon_days
    }

    /// 某型号砂箱某日余量; 型号未建档或日序号越界按 0 处理
    pub fn flask_available(&self, flask_type: &str, day: i64) -> i64 {
        if !self.contains_day(day) {
            return 0;
        }
        self.flask
            .get(flask_type)
            .map(|row| row[day as usize])
            .unwrap_or(0)
    }

    /// 取某型号砂箱余量行的副本 (落位搜索用草稿行)
    ///
    /// 同一订单多日造型的锁定窗口互相重叠, 搜索时必须在草稿上
    /// 扣减本订单已占用的砂箱, 否则会高估后续天的余量
    pub fn flask_row_scratch(&self, flask_type: &str) -> Vec<i64> {
        self.flask
            .get(flask_type)
            .cloned()
            .unwrap_or_else(|| vec![0; self.horizon_days as usize])
    }

    /// 某日浇注吨位余量; 越界按 0 处理
    pub fn pour_tons_available(&self, day: i64) -> f64 {
        if !self.contains_day(day) {
            return 0.0;
        }
        self.pour_tons[day as usize]
    }
}

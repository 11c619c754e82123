// ==========================================
// 铸造排产系统 - 订单与零件主数据
// ==========================================
// 红线: 主数据缺失/非法即拒绝, 不做默认值兜底
// ==========================================

use crate::domain::types::FailureReason;
use serde::{Deserialize, Serialize};

// ==========================================
// CastingOrder - 铸造订单
// ==========================================
// 来源: 上游需求数据; 排产期间只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastingOrder {
    pub order_id: String,   // 订单号
    pub part_ref: String,   // 零件图号 (PartProfile 主键)
    pub remaining_qty: i64, // 剩余待排数量 (件)
    pub due_day: i64,       // 交期 (相对排产起点的工作日序号)
    pub priority: i32,      // 优先级 (越小越紧急, 上游按类别赋值)
}

// ==========================================
// PartProfile - 零件工艺主数据
// ==========================================
// 单次排产内不可变; 全部字段必填且为正
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartProfile {
    pub flask_type: String,   // 砂箱型号 (资源分组键)
    pub cool_hours: f64,      // 冷却时长 (小时, >0)
    pub finish_days: i64,     // 精整标准工期 (工作日, >0)
    pub min_finish_days: i64, // 精整最短工期 (工作日, >0, ≤ finish_days)
    pub pieces_per_mold: i64, // 每箱件数 (>0)
    pub metal_per_unit: f64,  // 单件浇注吨位 (净重 × 工艺系数, >0)
}

impl PartProfile {
    /// 主数据校验 (fail-fast, 指明违规字段)
    ///
    /// 校验规则:
    /// - flask_type 非空
    /// - cool_hours / finish_days / min_finish_days / pieces_per_mold / metal_per_unit 为正
    /// - min_finish_days ≤ finish_days
    ///
    /// # 返回
    /// - `Ok(())`: 主数据合法
    /// - `Err(FailureReason::MissingMasterData)`: 指明首个违规字段
    pub fn validate(&self) -> Result<(), FailureReason> {
        if self.flask_type.trim().is_empty() {
            return Err(Self::missing("flask_type"));
        }
        if !self.cool_hours.is_finite() || self.cool_hours <= 0.0 {
            return Err(Self::missing("cool_hours"));
        }
        if self.finish_days <= 0 {
            return Err(Self::missing("finish_days"));
        }
        if self.min_finish_days <= 0 || self.min_finish_days > self.finish_days {
            return Err(Self::missing("min_finish_days"));
        }
        if self.pieces_per_mold <= 0 {
            return Err(Self::missing("pieces_per_mold"));
        }
        if !self.metal_per_unit.is_finite() || self.metal_per_unit <= 0.0 {
            return Err(Self::missing("metal_per_unit"));
        }
        Ok(())
    }

    /// 冷却天数 (工作日近似): ceil(cool_hours / 24)
    ///
    /// 注意: 这是刻意的工作日近似, 不做 24/7 日历精确换算,
    /// 切换口径会改变砂箱冲突判定结果
    pub fn cool_days(&self) -> i64 {
        (self.cool_hours / 24.0).ceil() as i64
    }

    /// 数量换算为砂箱数: ceil(qty / pieces_per_mold)
    pub fn molds_for(&self, qty: i64) -> i64 {
        debug_assert!(self.pieces_per_mold > 0);
        (qty + self.pieces_per_mold - 1) / self.pieces_per_mold
    }

    fn missing(field: &str) -> FailureReason {
        FailureReason::MissingMasterData {
            field: field.to_string(),
        }
    }
}

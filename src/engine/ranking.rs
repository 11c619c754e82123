// ==========================================
// 铸造排产系统 - 订单排序引擎
// ==========================================
// 职责: 落位前的订单全序排序
// 红线: 同键并列必须以 order_id 决出, 保证可重复性
// ==========================================

use crate::domain::order::CastingOrder;
use std::cmp::Ordering;

// ==========================================
// OrderRanker - 订单排序引擎
// ==========================================
pub struct OrderRanker {
    // 无状态引擎, 不需要注入依赖
}

impl OrderRanker {
    /// 构造函数
    ///
    /// # 返回
    /// 新的 OrderRanker 实例
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 排序订单列表
    ///
    /// 排序键:
    /// 1) priority 升序 (越小越紧急)
    /// 2) order_id 升序 (确定性 tie-break)
    ///
    /// # 参数
    /// - `orders`: 待排序的订单列表
    ///
    /// # 返回
    /// 排序后的订单列表 (按优先级从高到低)
    pub fn sort(&self, mut orders: Vec<CastingOrder>) -> Vec<CastingOrder> {
        orders.sort_by(|a, b| self.compare(a, b));
        orders
    }

    /// 比较两个订单的优先级
    ///
    /// # 返回
    /// Ordering::Less 表示 a 优先于 b
    fn compare(&self, a: &CastingOrder, b: &CastingOrder) -> Ordering {
        match a.priority.cmp(&b.priority) {
            Ordering::Equal => a.order_id.cmp(&b.order_id),
            other => other,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for OrderRanker {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 订单导入系统 - 信用额度校验
// ==========================================
// 规则: 客户订单金额合计 > 信用额度 → 输出超额记录
// - 无订单客户合计为 0
// - 合计 == 额度 不输出
// - 输出按客户主键升序
// ==========================================

use crate::domain::customer::Customer;
use crate::domain::order::Order;
use crate::domain::types::CustomerId;
use crate::repository::{CustomerRepository, OrderRepository, RepositoryResult};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, instrument, warn};

// ==========================================
// LimitViolation - 超额记录
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct LimitViolation {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub credit_limit: Decimal,
    pub order_total: Decimal,
    pub overage: Decimal, // order_total - credit_limit，恒 > 0
}

impl fmt::Display for LimitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "客户 {} (ID {}) 超出信用额度: 额度 {}, 订单合计 {}, 超额 {}",
            self.customer_name, self.customer_id, self.credit_limit, self.order_total, self.overage
        )
    }
}

/// 计算超额客户（纯函数）
///
/// 引用不存在客户的订单不计入任何客户（外键约束下不应出现）
pub fn find_overages(customers: &[Customer], orders: &[Order]) -> Vec<LimitViolation> {
    let mut totals: HashMap<CustomerId, Decimal> = HashMap::with_capacity(customers.len());
    for order in orders {
        *totals.entry(order.customer_id).or_insert(Decimal::ZERO) += order.order_value;
    }

    let mut sorted: Vec<&Customer> = customers.iter().collect();
    sorted.sort_by_key(|c| c.id);

    let mut violations = Vec::new();
    for customer in sorted {
        let order_total = totals.remove(&customer.id).unwrap_or(Decimal::ZERO);
        if order_total > customer.credit_limit {
            violations.push(LimitViolation {
                customer_id: customer.id,
                customer_name: customer.name.clone(),
                credit_limit: customer.credit_limit,
                order_total,
                overage: order_total - customer.credit_limit,
            });
        }
    }

    if !totals.is_empty() {
        warn!(orphan_customers = totals.len(), "存在引用未知客户的订单，已忽略");
    }

    violations
}

/// 渲染额度校验报告
pub fn render_report(violations: &[LimitViolation]) -> String {
    if violations.is_empty() {
        return "额度校验完成: 没有客户超出信用额度".to_string();
    }

    let mut lines = Vec::with_capacity(violations.len() + 1);
    lines.push(format!("额度校验完成: {} 个客户超出信用额度", violations.len()));
    lines.extend(violations.iter().map(|v| v.to_string()));
    lines.join("\n")
}

// ==========================================
// LimitChecker
// ==========================================
pub struct LimitChecker<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    customer_repo: C,
    order_repo: O,
}

impl<C, O> LimitChecker<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    pub fn new(customer_repo: C, order_repo: O) -> Self {
        Self {
            customer_repo,
            order_repo,
        }
    }

    /// 读取全部客户与订单并计算超额
    #[instrument(skip(self))]
    pub fn check(&self) -> RepositoryResult<Vec<LimitViolation>> {
        let orders = self.order_repo.find_all()?;
        let customers = self.customer_repo.find_all()?;

        let violations = find_overages(&customers, &orders);
        info!(
            customers = customers.len(),
            orders = orders.len(),
            violations = violations.len(),
            "额度校验完成"
        );
        Ok(violations)
    }
}

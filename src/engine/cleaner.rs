// ==========================================
// 订单导入系统 - 数据清理
// ==========================================
// 职责: 删除全部订单与客户（订单在前，遵守外键）
// 幂等: 空库上执行同样成功
// ==========================================

use crate::domain::types::{CustomerId, OrderId};
use crate::repository::{CustomerRepository, OrderRepository, RepositoryResult};
use std::fmt;
use tracing::{info, instrument};

// ==========================================
// CleanSummary - 清理结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    pub orders_deleted: usize,
    pub customers_deleted: usize,
}

impl fmt::Display for CleanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "清理完成: 删除订单 {} 条, 删除客户 {} 条",
            self.orders_deleted, self.customers_deleted
        )
    }
}

// ==========================================
// Cleaner
// ==========================================
pub struct Cleaner<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    customer_repo: C,
    order_repo: O,
}

impl<C, O> Cleaner<C, O>
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

    /// 删除全部订单与客户
    #[instrument(skip(self))]
    pub fn clean(&self) -> RepositoryResult<CleanSummary> {
        let order_ids: Vec<OrderId> = self.order_repo.find_all()?.iter().map(|o| o.id).collect();
        let orders_deleted = self.order_repo.batch_delete(&order_ids)?;

        let customer_ids: Vec<CustomerId> =
            self.customer_repo.find_all()?.iter().map(|c| c.id).collect();
        let customers_deleted = self.customer_repo.batch_delete(&customer_ids)?;

        let summary = CleanSummary {
            orders_deleted,
            customers_deleted,
        };
        info!(orders_deleted, customers_deleted, "数据清理完成");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};
    use crate::domain::customer::NewCustomer;
    use crate::domain::order::NewOrder;
    use crate::repository::{CustomerRepositoryImpl, OrderRepositoryImpl};
    use chrono::NaiveDate;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use std::sync::{Arc, Mutex};

    fn setup() -> Cleaner<CustomerRepositoryImpl, OrderRepositoryImpl> {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        let conn = Arc::new(Mutex::new(conn));
        Cleaner::new(
            CustomerRepositoryImpl::from_connection(conn.clone()),
            OrderRepositoryImpl::from_connection(conn),
        )
    }

    #[test]
    fn test_clean_removes_orders_then_customers() {
        let cleaner = setup();
        let ids = cleaner
            .customer_repo
            .batch_insert(&[NewCustomer {
                name: "Alice".to_string(),
                credit_limit: Decimal::new(100_000, 2),
            }])
            .unwrap();
        cleaner
            .order_repo
            .batch_insert(&[NewOrder {
                customer_id: ids[0],
                order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                order_value: Decimal::new(120_000, 2),
            }])
            .unwrap();

        let summary = cleaner.clean().unwrap();

        assert_eq!(summary.orders_deleted, 1);
        assert_eq!(summary.customers_deleted, 1);
        assert_eq!(cleaner.customer_repo.count().unwrap(), 0);
        assert_eq!(cleaner.order_repo.count().unwrap(), 0);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = setup();

        assert_eq!(cleaner.clean().unwrap(), CleanSummary::default());
        assert_eq!(cleaner.clean().unwrap(), CleanSummary::default());
    }
}

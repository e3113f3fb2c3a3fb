// ==========================================
// 订单导入系统 - 订单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只做数据 CRUD
// 约束: customer_id 外键由数据库强制（PRAGMA foreign_keys = ON）
// ==========================================

use crate::domain::order::{NewOrder, Order};
use crate::domain::types::{CustomerId, OrderId};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_mapping::{decimal_column, decimal_to_sql};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// OrderRepository Trait
// ==========================================
// 实现者: OrderRepositoryImpl（使用 rusqlite）
pub trait OrderRepository: Send + Sync {
    /// 批量插入订单（单事务）
    ///
    /// # 返回
    /// - Ok(Vec<OrderId>): 按输入顺序返回数据库分配的主键
    /// - Err: 数据库错误（含外键违反，整个事务回滚）
    fn batch_insert(&self, orders: &[NewOrder]) -> RepositoryResult<Vec<OrderId>>;

    /// 查询全部订单（按主键升序）
    fn find_all(&self) -> RepositoryResult<Vec<Order>>;

    /// 查询指定客户的订单
    fn find_by_customer_id(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Order>>;

    /// 批量删除订单（单事务）
    fn batch_delete(&self, ids: &[OrderId]) -> RepositoryResult<usize>;

    /// 订单总数
    fn count(&self) -> RepositoryResult<i64>;
}

// ==========================================
// OrderRepositoryImpl
// ==========================================
pub struct OrderRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Order> {
        Ok(Order {
            id: OrderId(row.get(0)?),
            customer_id: CustomerId(row.get(1)?),
            order_date: row.get(2)?,
            order_value: decimal_column(row, 3)?,
        })
    }
}

impl OrderRepository for OrderRepositoryImpl {
    fn batch_insert(&self, orders: &[NewOrder]) -> RepositoryResult<Vec<OrderId>> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut ids = Vec::with_capacity(orders.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO orders (customer_id, order_date, order_value) VALUES (?1, ?2, ?3)",
            )?;
            for order in orders {
                stmt.execute(params![
                    order.customer_id.0,
                    order.order_date,
                    decimal_to_sql(&order.order_value),
                ])?;
                ids.push(OrderId(tx.last_insert_rowid()));
            }
        }

        tx.commit()?;
        Ok(ids)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, customer_id, order_date, order_value FROM orders ORDER BY id ASC",
        )?;

        let orders = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(orders)
    }

    fn find_by_customer_id(&self, customer_id: CustomerId) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, customer_id, order_date, order_value
            FROM orders
            WHERE customer_id = ?1
            ORDER BY id ASC
            "#,
        )?;

        let orders = stmt
            .query_map(params![customer_id.0], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(orders)
    }

    fn batch_delete(&self, ids: &[OrderId]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut deleted = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM orders WHERE id = ?1")?;
            for id in ids {
                deleted += stmt.execute(params![id.0])?;
            }
        }

        tx.commit()?;
        Ok(deleted)
    }

    fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn setup() -> (Arc<Mutex<Connection>>, CustomerId) {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO customer (name, credit_limit) VALUES ('Alice', '1000.00')",
            [],
        )
        .unwrap();
        let id = CustomerId(conn.last_insert_rowid());
        (Arc::new(Mutex::new(conn)), id)
    }

    fn new_order(customer_id: CustomerId, value: i64) -> NewOrder {
        NewOrder {
            customer_id,
            order_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            order_value: Decimal::new(value, 2),
        }
    }

    #[test]
    fn test_batch_insert_and_query() {
        let (conn, alice) = setup();
        let repo = OrderRepositoryImpl::from_connection(conn);

        let ids = repo
            .batch_insert(&[new_order(alice, 120_000), new_order(alice, 99)])
            .unwrap();
        assert_eq!(ids.len(), 2);

        let orders = repo.find_by_customer_id(alice).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_value.to_string(), "1200.00");
        assert_eq!(orders[1].order_value.to_string(), "0.99");
        assert_eq!(orders[0].order_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_batch_insert_foreign_key_violation_rolls_back() {
        let (conn, alice) = setup();
        let repo = OrderRepositoryImpl::from_connection(conn);

        let result = repo.batch_insert(&[new_order(alice, 1), new_order(CustomerId(999), 1)]);
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));

        // 整批回滚
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_batch_delete() {
        let (conn, alice) = setup();
        let repo = OrderRepositoryImpl::from_connection(conn);
        let ids = repo.batch_insert(&[new_order(alice, 1), new_order(alice, 2)]).unwrap();

        assert_eq!(repo.batch_delete(&ids).unwrap(), 2);
        assert!(repo.find_all().unwrap().is_empty());
    }
}

// ==========================================
// 订单导入系统 - 客户数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只做数据 CRUD
// 批量写入/删除均在单个事务内完成（全部成功或全部回滚）
// ==========================================

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::CustomerId;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_mapping::{decimal_column, decimal_to_sql};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// CustomerRepository Trait
// ==========================================
// 实现者: CustomerRepositoryImpl（使用 rusqlite）
pub trait CustomerRepository: Send + Sync {
    /// 批量插入客户（单事务）
    ///
    /// # 返回
    /// - Ok(Vec<CustomerId>): 按输入顺序返回数据库分配的主键
    /// - Err: 数据库错误（整个事务回滚）
    fn batch_insert(&self, customers: &[NewCustomer]) -> RepositoryResult<Vec<CustomerId>>;

    /// 查询全部客户（按主键升序）
    fn find_all(&self) -> RepositoryResult<Vec<Customer>>;

    /// 按名称精确查询（按主键升序）
    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Customer>>;

    /// 批量删除客户（单事务）
    ///
    /// # 返回
    /// - Ok(usize): 实际删除的记录数
    fn batch_delete(&self, ids: &[CustomerId]) -> RepositoryResult<usize>;

    /// 客户总数
    fn count(&self) -> RepositoryResult<i64>;
}

// ==========================================
// CustomerRepositoryImpl
// ==========================================
pub struct CustomerRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerRepositoryImpl {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> SqliteResult<Customer> {
        Ok(Customer {
            id: CustomerId(row.get(0)?),
            name: row.get(1)?,
            credit_limit: decimal_column(row, 2)?,
        })
    }
}

impl CustomerRepository for CustomerRepositoryImpl {
    fn batch_insert(&self, customers: &[NewCustomer]) -> RepositoryResult<Vec<CustomerId>> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut ids = Vec::with_capacity(customers.len());
        {
            let mut stmt =
                tx.prepare("INSERT INTO customer (name, credit_limit) VALUES (?1, ?2)")?;
            for customer in customers {
                stmt.execute(params![customer.name, decimal_to_sql(&customer.credit_limit)])?;
                ids.push(CustomerId(tx.last_insert_rowid()));
            }
        }

        tx.commit()?;
        Ok(ids)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, name, credit_limit FROM customer ORDER BY id ASC")?;

        let customers = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(customers)
    }

    fn find_by_name(&self, name: &str) -> RepositoryResult<Vec<Customer>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, credit_limit FROM customer WHERE name = ?1 ORDER BY id ASC",
        )?;

        let customers = stmt
            .query_map(params![name], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(customers)
    }

    fn batch_delete(&self, ids: &[CustomerId]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let mut deleted = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM customer WHERE id = ?1")?;
            for id in ids {
                deleted += stmt.execute(params![id.0])?;
            }
        }

        tx.commit()?;
        Ok(deleted)
    }

    fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{configure_sqlite_connection, init_schema};
    use rust_decimal::Decimal;

    fn setup() -> CustomerRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        CustomerRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn new_customer(name: &str, limit: i64) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            credit_limit: Decimal::new(limit, 2),
        }
    }

    #[test]
    fn test_batch_insert_returns_ids_in_order() {
        let repo = setup();
        let ids = repo
            .batch_insert(&[new_customer("Alice", 100_000), new_customer("Bob", 50_050)])
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);

        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, ids[0]);
        assert_eq!(all[0].name, "Alice");
        assert_eq!(all[1].credit_limit.to_string(), "500.50");
    }

    #[test]
    fn test_find_by_name_exact_match() {
        let repo = setup();
        repo.batch_insert(&[new_customer("Alice", 1), new_customer("alice", 2)])
            .unwrap();

        let found = repo.find_by_name("Alice").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].credit_limit, Decimal::new(1, 2));
        assert!(repo.find_by_name("Carol").unwrap().is_empty());
    }

    #[test]
    fn test_batch_delete_counts_only_existing() {
        let repo = setup();
        let ids = repo.batch_insert(&[new_customer("Alice", 1)]).unwrap();

        assert_eq!(repo.batch_delete(&[ids[0], CustomerId(999)]).unwrap(), 1);
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.batch_delete(&[]).unwrap(), 0);
    }
}

// ==========================================
// 订单导入系统 - 存储会话
// ==========================================
// 每个操作独立打开连接，作用域结束（含错误路径）即释放
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::customer_repo::CustomerRepositoryImpl;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::order_repo::OrderRepositoryImpl;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// Store - 单次操作的数据库会话
// ==========================================
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

impl Store {
    /// 打开数据库并确保表结构存在
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        ensure_parent_dir(db_path)?;
        let conn = open_sqlite_connection(db_path).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("{}: {}", db_path, e))
        })?;
        init_schema(&conn)?;
        debug!(db_path = %db_path, "数据库会话已打开");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: db_path.to_string(),
        })
    }

    /// 数据库文件路径
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// 客户仓储（共享本会话连接）
    pub fn customers(&self) -> CustomerRepositoryImpl {
        CustomerRepositoryImpl::from_connection(Arc::clone(&self.conn))
    }

    /// 订单仓储（共享本会话连接）
    pub fn orders(&self) -> OrderRepositoryImpl {
        OrderRepositoryImpl::from_connection(Arc::clone(&self.conn))
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        debug!(db_path = %self.db_path, "数据库会话已释放");
    }
}

// 数据库文件所在目录不存在时创建
fn ensure_parent_dir(db_path: &str) -> RepositoryResult<()> {
    match Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            std::fs::create_dir_all(dir).map_err(|e| {
                RepositoryError::DatabaseConnectionError(format!("{}: {}", dir.display(), e))
            })?;
            debug!(dir = %dir.display(), "已创建数据库目录");
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::customer_repo::CustomerRepository;
    use crate::repository::order_repo::OrderRepository;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("data").join("orders.db");
        let db_path = db_path.to_string_lossy().to_string();

        let store = Store::open(&db_path).unwrap();

        assert!(temp_dir.path().join("nested").join("data").is_dir());
        assert_eq!(store.customers().count().unwrap(), 0);
    }

    #[test]
    fn test_open_in_memory() {
        let store = Store::open(":memory:").unwrap();
        assert_eq!(store.db_path(), ":memory:");
        assert_eq!(store.orders().count().unwrap(), 0);
    }
}

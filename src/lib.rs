// ==========================================
// 订单导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 功能: 客户/订单分隔符文件导入、清理、信用额度校验
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 清理与额度校验
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 连接串与输入文件
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// 应用层 - 操作调度
pub mod app;

// 命令行
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::{AppError, AppResult, Operation, OperationReport, OperationRunner};
pub use config::AppConfig;
pub use domain::{Customer, CustomerId, NewCustomer, NewOrder, Order, OrderId};
pub use engine::{CleanSummary, Cleaner, LimitChecker, LimitViolation};
pub use importer::{ImportError, ImportSummary, NameResolver, OrderImporter, RecordParser};
pub use repository::{RepositoryError, Store};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "订单导入系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

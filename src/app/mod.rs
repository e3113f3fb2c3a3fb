// ==========================================
// 订单导入系统 - 应用层
// ==========================================
// 职责: 操作调度，连接命令行与导入/清理/校验
// ==========================================

pub mod error;
pub mod operation;
pub mod runner;

// 重导出
pub use error::{AppError, AppResult};
pub use operation::Operation;
pub use runner::{OperationReport, OperationRunner};

// ==========================================
// 订单导入系统 - 引擎层
// ==========================================
// 职责: 清理与额度校验规则，不拼 SQL
// ==========================================

pub mod cleaner;
pub mod limit_checker;

// 重导出核心引擎
pub use cleaner::{CleanSummary, Cleaner};
pub use limit_checker::{find_overages, render_report, LimitChecker, LimitViolation};

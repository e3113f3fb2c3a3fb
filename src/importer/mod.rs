// ==========================================
// 订单导入系统 - 导入层
// ==========================================
// 职责: 外部分隔符文本 → 客户/订单记录 → 数据库
// ==========================================

pub mod error;
pub mod name_resolver;
pub mod order_importer;
pub mod record_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use name_resolver::NameResolver;
pub use order_importer::{ImportSummary, OrderImporter};
pub use record_parser::{RawLine, RecordParser, DEFAULT_DELIMITER};

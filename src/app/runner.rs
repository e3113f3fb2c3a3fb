// ==========================================
// 订单导入系统 - 操作调度器
// ==========================================
// 职责: 按操作类型调用 Importer / Cleaner / LimitChecker
// 资源: 每个步骤独立打开 Store，步骤结束即释放
// ==========================================

use crate::app::error::AppResult;
use crate::app::operation::Operation;
use crate::config::AppConfig;
use crate::engine::{render_report, CleanSummary, Cleaner, LimitChecker, LimitViolation};
use crate::importer::{ImportSummary, OrderImporter, RecordParser};
use crate::repository::Store;
use std::fmt;
use tracing::{info, instrument};

// ==========================================
// OperationReport - 操作结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum OperationReport {
    Imported(ImportSummary),
    Cleaned(CleanSummary),
    Checked(Vec<LimitViolation>),
    Full {
        cleaned: CleanSummary,
        imported: ImportSummary,
        violations: Vec<LimitViolation>,
    },
}

impl OperationReport {
    /// 超额记录（仅 check / full）
    pub fn violations(&self) -> &[LimitViolation] {
        match self {
            OperationReport::Checked(violations) => violations,
            OperationReport::Full { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl fmt::Display for OperationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationReport::Imported(summary) => write!(f, "{}", summary),
            OperationReport::Cleaned(summary) => write!(f, "{}", summary),
            OperationReport::Checked(violations) => write!(f, "{}", render_report(violations)),
            OperationReport::Full {
                cleaned,
                imported,
                violations,
            } => write!(f, "{}\n{}\n{}", cleaned, imported, render_report(violations)),
        }
    }
}

// ==========================================
// OperationRunner
// ==========================================
pub struct OperationRunner {
    config: AppConfig,
}

impl OperationRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 执行操作
    #[instrument(skip(self), fields(db_path = %self.config.db_path))]
    pub fn run(&self, operation: Operation) -> AppResult<OperationReport> {
        info!(%operation, "开始执行操作");

        let report = match operation {
            Operation::Import => OperationReport::Imported(self.import()?),
            Operation::Clean => OperationReport::Cleaned(self.clean()?),
            Operation::Check => OperationReport::Checked(self.check()?),
            Operation::Full => {
                let cleaned = self.clean()?;
                let imported = self.import()?;
                let violations = self.check()?;
                OperationReport::Full {
                    cleaned,
                    imported,
                    violations,
                }
            }
        };

        info!(%operation, "操作执行完成");
        Ok(report)
    }

    /// 导入客户与订单文件
    pub fn import(&self) -> AppResult<ImportSummary> {
        let store = self.open_store()?;
        let importer = OrderImporter::new(
            store.customers(),
            store.orders(),
            RecordParser::new(self.config.delimiter),
        );
        Ok(importer.import(&self.config.customer_file, &self.config.order_file)?)
    }

    /// 清空订单与客户
    pub fn clean(&self) -> AppResult<CleanSummary> {
        let store = self.open_store()?;
        let cleaner = Cleaner::new(store.customers(), store.orders());
        Ok(cleaner.clean()?)
    }

    /// 信用额度校验
    pub fn check(&self) -> AppResult<Vec<LimitViolation>> {
        let store = self.open_store()?;
        let checker = LimitChecker::new(store.customers(), store.orders());
        Ok(checker.check()?)
    }

    fn open_store(&self) -> AppResult<Store> {
        Ok(Store::open(&self.config.db_path)?)
    }
}

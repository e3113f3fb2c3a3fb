// ==========================================
// 订单导入系统 - 客户/订单导入器
// ==========================================
// 流程: 解析客户 → 重名校验 → 客户落库 → 解析订单 → 名称解析 → 订单落库
// ==========================================
// 约束:
// - 客户批次必须提交完成后才开始解析订单引用
// - 每个文件单批次单事务写入：要么全部落库，要么一条不落
// - 两个批次之间无事务：订单阶段失败时客户保持已落库（已知限制）
// ==========================================

use crate::domain::customer::{CustomerRecord, NewCustomer};
use crate::domain::order::NewOrder;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::name_resolver::NameResolver;
use crate::importer::record_parser::RecordParser;
use crate::repository::{CustomerRepository, OrderRepository};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

// ==========================================
// ImportSummary - 导入结果汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub customers_added: usize,
    pub orders_added: usize,
    pub elapsed_ms: u128,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "导入完成: 新增客户 {} 条, 新增订单 {} 条 (耗时 {} ms)",
            self.customers_added, self.orders_added, self.elapsed_ms
        )
    }
}

// ==========================================
// OrderImporter
// ==========================================
pub struct OrderImporter<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    // 数据访问层
    customer_repo: C,
    order_repo: O,

    // 记录解析器
    parser: RecordParser,
}

impl<C, O> OrderImporter<C, O>
where
    C: CustomerRepository,
    O: OrderRepository,
{
    pub fn new(customer_repo: C, order_repo: O, parser: RecordParser) -> Self {
        Self {
            customer_repo,
            order_repo,
            parser,
        }
    }

    /// 导入客户文件与订单文件（客户在前）
    ///
    /// # 返回
    /// - Ok(ImportSummary): 两个批次的写入数量
    /// - Err: 格式错误 / 重名 / 未知客户 / 数据库错误（中止后续步骤）
    #[instrument(skip(self, customer_file, order_file), fields(
        customer_file = %customer_file.as_ref().display(),
        order_file = %order_file.as_ref().display()
    ))]
    pub fn import<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        customer_file: P,
        order_file: Q,
    ) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        info!("开始导入客户与订单数据");

        let mut resolver = NameResolver::preload(&self.customer_repo)?;

        // === 阶段 1: 客户 ===
        let customers_added = self
            .import_customers(customer_file.as_ref(), &mut resolver)
            .map_err(|e| {
                error!(error = %e, "客户导入失败");
                e
            })?;
        info!(count = customers_added, "customers added");

        // === 阶段 2: 订单 ===
        let orders_added = self
            .import_orders(order_file.as_ref(), &mut resolver)
            .map_err(|e| {
                error!(error = %e, customers_added, "订单导入失败（客户批次已提交，不回滚）");
                e
            })?;
        info!(count = orders_added, "orders added");

        let summary = ImportSummary {
            customers_added,
            orders_added,
            elapsed_ms: start_time.elapsed().as_millis(),
        };
        info!(elapsed_ms = summary.elapsed_ms as u64, "导入完成");
        Ok(summary)
    }

    /// 客户阶段: 解析 + 重名校验 + 单批次写入，并登记到解析器
    pub fn import_customers(
        &self,
        customer_file: &Path,
        resolver: &mut NameResolver<'_, C>,
    ) -> ImportResult<usize> {
        debug!(file = %customer_file.display(), "步骤 1: 解析客户文件");
        let records = self.parser.parse_customer_file(customer_file)?;
        info!(total_rows = records.len(), "客户文件解析完成");

        debug!("步骤 2: 客户名称唯一性校验");
        check_unique_names(&records, resolver)?;

        debug!("步骤 3: 客户批量落库");
        let customers: Vec<NewCustomer> = records.into_iter().map(|r| r.customer).collect();
        let ids = self.customer_repo.batch_insert(&customers)?;

        for (customer, id) in customers.iter().zip(ids.iter()) {
            resolver.register(&customer.name, *id);
        }

        Ok(ids.len())
    }

    /// 订单阶段: 解析 + 名称解析 + 单批次写入
    pub fn import_orders(
        &self,
        order_file: &Path,
        resolver: &mut NameResolver<'_, C>,
    ) -> ImportResult<usize> {
        debug!(file = %order_file.display(), "步骤 4: 解析订单文件");
        let records = self.parser.parse_order_file(order_file)?;
        info!(total_rows = records.len(), "订单文件解析完成");

        debug!("步骤 5: 客户名称解析");
        let mut orders: Vec<NewOrder> = Vec::with_capacity(records.len());
        for record in records {
            let line = record.line;
            let customer_id = resolver
                .resolve(&record.customer_name)
                .map_err(|e| e.with_line(line))?;
            orders.push(record.into_new_order(customer_id));
        }

        debug!("步骤 6: 订单批量落库");
        let ids = self.order_repo.batch_insert(&orders)?;
        Ok(ids.len())
    }
}

/// 客户名称唯一性校验
///
/// 文件内重复、或与数据库已有客户重名，均拒绝整批
fn check_unique_names<R>(records: &[CustomerRecord], resolver: &NameResolver<'_, R>) -> ImportResult<()>
where
    R: CustomerRepository + ?Sized,
{
    let mut seen: HashMap<&str, u64> = HashMap::with_capacity(records.len());

    for record in records {
        let name = record.customer.name.as_str();

        if let Some(existing) = resolver.cached(name) {
            return Err(ImportError::DuplicateName {
                name: name.to_string(),
                line: record.line,
                first_seen: format!("数据库已有客户 id={}", existing),
            });
        }

        if let Some(first_line) = seen.insert(name, record.line) {
            return Err(ImportError::DuplicateName {
                name: name.to_string(),
                line: record.line,
                first_seen: format!("第 {} 行", first_line),
            });
        }
    }

    Ok(())
}

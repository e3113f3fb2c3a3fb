// ==========================================
// 订单导入系统 - 客户名称解析器
// ==========================================
// 职责: 客户名称（自然键）→ 客户主键
// 来源: 导入过程中增量维护的内存缓存，未命中时回查数据库
// 重名: 取主键最小（最先落库）者
// ==========================================

use crate::domain::types::CustomerId;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::{CustomerRepository, RepositoryResult};
use std::collections::HashMap;
use tracing::debug;

pub struct NameResolver<'a, R>
where
    R: CustomerRepository + ?Sized,
{
    customer_repo: &'a R,
    cache: HashMap<String, CustomerId>,
}

impl<'a, R> NameResolver<'a, R>
where
    R: CustomerRepository + ?Sized,
{
    /// 创建空缓存的解析器
    pub fn new(customer_repo: &'a R) -> Self {
        Self {
            customer_repo,
            cache: HashMap::new(),
        }
    }

    /// 以数据库现有客户预热缓存
    pub fn preload(customer_repo: &'a R) -> RepositoryResult<Self> {
        let mut resolver = Self::new(customer_repo);
        // find_all 按主键升序，重名时保留第一条
        for customer in customer_repo.find_all()? {
            resolver.cache.entry(customer.name).or_insert(customer.id);
        }
        debug!(cached = resolver.cache.len(), "名称缓存预热完成");
        Ok(resolver)
    }

    /// 登记新落库的客户（已存在的名称不覆盖）
    pub fn register(&mut self, name: &str, id: CustomerId) {
        self.cache.entry(name.to_string()).or_insert(id);
    }

    /// 仅查缓存，不回查数据库
    pub fn cached(&self, name: &str) -> Option<CustomerId> {
        self.cache.get(name).copied()
    }

    /// 缓存中的名称数量
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// 解析客户名称（精确匹配）
    ///
    /// # 返回
    /// - Ok(CustomerId): 解析成功
    /// - Err(UnknownCustomer): 缓存与数据库均无此名称
    /// - Err(Repository): 数据库错误
    pub fn resolve(&mut self, name: &str) -> ImportResult<CustomerId> {
        if let Some(id) = self.cached(name) {
            return Ok(id);
        }

        let found = self.customer_repo.find_by_name(name)?;
        match found.first() {
            Some(customer) => {
                debug!(name = %name, id = %customer.id, "名称缓存未命中，数据库回查成功");
                self.cache.insert(name.to_string(), customer.id);
                Ok(customer.id)
            }
            None => Err(ImportError::UnknownCustomer {
                name: name.to_string(),
                line: None,
            }),
        }
    }
}

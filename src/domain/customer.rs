// ==========================================
// 订单导入系统 - 客户领域模型
// ==========================================
// 对齐: customer 表
// 生命周期: 导入时创建，清理时批量删除，不做原地更新
// ==========================================

use crate::domain::types::CustomerId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Customer - 已落库客户
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,        // 数据库分配
    pub name: String,          // 自然键（导入时用于订单解析）
    pub credit_limit: Decimal, // 信用额度 decimal(8, 2)
}

// ==========================================
// NewCustomer - 待插入客户（尚无主键）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub credit_limit: Decimal,
}

impl NewCustomer {
    /// 附加数据库分配的主键
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            name: self.name,
            credit_limit: self.credit_limit,
        }
    }
}

// ==========================================
// CustomerRecord - 客户文件解析结果
// ==========================================
// 用途: 导入层中间结构，保留行号以便报错定位
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub line: u64,
    pub customer: NewCustomer,
}

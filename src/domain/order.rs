// ==========================================
// 订单导入系统 - 订单领域模型
// ==========================================
// 对齐: orders 表（customer_id 外键 → customer.id）
// ==========================================

use crate::domain::types::{CustomerId, OrderId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ==========================================
// Order - 已落库订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    pub order_value: Decimal, // decimal(8, 2)
}

// ==========================================
// NewOrder - 待插入订单（客户已解析）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    pub order_value: Decimal,
}

impl NewOrder {
    /// 附加数据库分配的主键
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            customer_id: self.customer_id,
            order_date: self.order_date,
            order_value: self.order_value,
        }
    }
}

// ==========================================
// OrderRecord - 订单文件解析结果
// ==========================================
// 客户仍以名称引用，落库前需经 NameResolver 解析
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub line: u64,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub order_value: Decimal,
}

impl OrderRecord {
    /// 绑定解析后的客户主键
    pub fn into_new_order(self, customer_id: CustomerId) -> NewOrder {
        NewOrder {
            customer_id,
            order_date: self.order_date,
            order_value: self.order_value,
        }
    }
}

// ==========================================
// 订单导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、字段校验规则
// 红线: 不含数据访问逻辑
// ==========================================

pub mod customer;
pub mod order;
pub mod types;

// 重导出核心类型
pub use customer::{Customer, CustomerRecord, NewCustomer};
pub use order::{NewOrder, Order, OrderRecord};
pub use types::{
    parse_money, parse_order_date, validate_customer_name, CustomerId, OrderId,
    CUSTOMER_NAME_MAX_CHARS, MONEY_PRECISION, MONEY_SCALE,
};

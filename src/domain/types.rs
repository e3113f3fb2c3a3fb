// ==========================================
// 订单导入系统 - 领域类型定义
// ==========================================
// 主键新类型 / 金额 decimal(8,2) / 订单日期
// ==========================================

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 金额总位数（decimal(8, 2)）
pub const MONEY_PRECISION: u32 = 8;

/// 金额小数位数
pub const MONEY_SCALE: u32 = 2;

/// 客户名称最大长度（字符数）
pub const CUSTOMER_NAME_MAX_CHARS: usize = 100;

// ==========================================
// 主键 (由数据库分配)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 金额解析
// ==========================================

/// 解析金额字符串为 decimal(8, 2)
///
/// # 规则
/// - 仅允许可选正负号、数字与至多一个小数点
/// - 最多 2 位小数（尾随 0 不计入，如 "1.500"）
/// - 整数部分最多 6 位
/// - 返回值统一为 2 位小数（"1000" → 1000.00）
pub fn parse_money(raw: &str) -> Result<Decimal, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("金额为空".to_string());
    }

    let digits = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
    let well_formed = digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if !well_formed {
        return Err(format!("无法解析为金额 '{}': 含非法字符", value));
    }

    let mut amount =
        Decimal::from_str(value).map_err(|e| format!("无法解析为金额 '{}': {}", value, e))?;

    if amount.normalize().scale() > MONEY_SCALE {
        return Err(format!("金额 '{}' 小数位超过 {} 位", value, MONEY_SCALE));
    }

    let integer_limit = Decimal::from(10_i64.pow(MONEY_PRECISION - MONEY_SCALE));
    if amount.abs() >= integer_limit {
        return Err(format!(
            "金额 '{}' 超出 decimal({}, {}) 范围",
            value, MONEY_PRECISION, MONEY_SCALE
        ));
    }

    amount.rescale(MONEY_SCALE);
    Ok(amount)
}

// ==========================================
// 日期解析
// ==========================================

/// 支持的日期格式（按顺序尝试）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// 解析订单日期
///
/// 支持 ISO / 德式点号 / 美式斜杠格式，可带 " HH:MM:SS" 时间部分（丢弃）
pub fn parse_order_date(raw: &str) -> Result<NaiveDate, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("日期为空".to_string());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }

        let with_time = format!("{} %H:%M:%S", format);
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, &with_time) {
            return Ok(dt.date());
        }
    }

    Err(format!("无法解析为日期: '{}'", value))
}

/// 校验客户名称（非空，最多 100 个字符）
pub fn validate_customer_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("客户名称为空".to_string());
    }

    let chars = name.chars().count();
    if chars > CUSTOMER_NAME_MAX_CHARS {
        return Err(format!(
            "客户名称长度 {} 超过上限 {}",
            chars, CUSTOMER_NAME_MAX_CHARS
        ));
    }

    Ok(name.to_string())
}

// ==========================================
// 订单导入系统 - 行映射辅助
// ==========================================
// 金额以规范化 TEXT 存储，读取时还原为 Decimal（不经浮点）
// ==========================================

use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;

/// 读取 TEXT 金额列
pub(crate) fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// 金额写库格式
pub(crate) fn decimal_to_sql(value: &Decimal) -> String {
    value.to_string()
}

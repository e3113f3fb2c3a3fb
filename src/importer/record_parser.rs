// ==========================================
// 订单导入系统 - 记录解析器
// ==========================================
// 输入: 分隔符文本（默认制表符），首行为表头，无条件跳过
// 输出: CustomerRecord / OrderRecord（带行号）
// ==========================================
// 规则:
// - 文件整体读入内存后再解析
// - 列数必须与记录类型严格一致
// - 字段类型转换失败即为格式错误
// - 仅跳过空行；仅含分隔符/空格的行照常校验
// ==========================================

use crate::domain::customer::{CustomerRecord, NewCustomer};
use crate::domain::order::OrderRecord;
use crate::domain::types::{parse_money, parse_order_date, validate_customer_name};
use crate::importer::error::{ImportError, ImportResult};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

/// 默认字段分隔符
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// 客户文件列: Name, CreditLimit
pub const CUSTOMER_COLUMNS: &[&str] = &["Name", "CreditLimit"];

/// 订单文件列: CustomerName, OrderDate, OrderValue
pub const ORDER_COLUMNS: &[&str] = &["CustomerName", "OrderDate", "OrderValue"];

// ==========================================
// RawLine - 已切分但未做类型转换的一行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    pub line: u64,
    pub fields: Vec<String>,
    pub content: String,
}

// ==========================================
// RecordParser
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    delimiter: u8,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl RecordParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// 整体读入文件内容（UTF-8）
    pub fn read_file(path: &Path) -> ImportResult<String> {
        std::fs::read_to_string(path).map_err(|e| ImportError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 切分数据行并校验列数
    ///
    /// # 参数
    /// - source: 来源名称（文件路径，用于报错）
    /// - text: 文件全文
    /// - columns: 期望列名（仅用于列数校验与报错）
    pub fn split_lines(
        &self,
        source: &str,
        text: &str,
        columns: &[&str],
    ) -> ImportResult<Vec<RawLine>> {
        // 首个物理行无条件视为表头（即使为空行）
        let body = match text.find('\n') {
            Some(idx) => &text[idx + 1..],
            None => "",
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true) // 列数由下方自行校验
            .quoting(false)
            .from_reader(body.as_bytes());

        let mut lines = Vec::new();
        for result in reader.records() {
            // 行号补回已剥离的表头行
            let record = result.map_err(|e| ImportError::MalformedRecord {
                file: source.to_string(),
                line: e.position().map(|p| p.line() + 1).unwrap_or(0),
                field: "*".to_string(),
                content: String::new(),
                reason: e.to_string(),
            })?;

            let line = record.position().map(|p| p.line() + 1).unwrap_or(0);
            let content = self.join(&record);

            if record.len() != columns.len() {
                return Err(ImportError::MalformedRecord {
                    file: source.to_string(),
                    line,
                    field: "*".to_string(),
                    content,
                    reason: format!(
                        "列数不匹配: 期望 {} 列 ({}), 实际 {} 列",
                        columns.len(),
                        columns.join(", "),
                        record.len()
                    ),
                });
            }

            lines.push(RawLine {
                line,
                fields: record.iter().map(|v| v.trim().to_string()).collect(),
                content,
            });
        }

        Ok(lines)
    }

    /// 解析客户文件内容
    pub fn parse_customers(&self, source: &str, text: &str) -> ImportResult<Vec<CustomerRecord>> {
        self.split_lines(source, text, CUSTOMER_COLUMNS)?
            .into_iter()
            .map(|raw| -> ImportResult<CustomerRecord> {
                let name = validate_customer_name(&raw.fields[0])
                    .map_err(|reason| malformed(source, &raw, CUSTOMER_COLUMNS[0], reason))?;
                let credit_limit = parse_money(&raw.fields[1])
                    .map_err(|reason| malformed(source, &raw, CUSTOMER_COLUMNS[1], reason))?;

                Ok(CustomerRecord {
                    line: raw.line,
                    customer: NewCustomer { name, credit_limit },
                })
            })
            .collect()
    }

    /// 解析订单文件内容（客户仍为名称引用）
    pub fn parse_orders(&self, source: &str, text: &str) -> ImportResult<Vec<OrderRecord>> {
        self.split_lines(source, text, ORDER_COLUMNS)?
            .into_iter()
            .map(|raw| -> ImportResult<OrderRecord> {
                let customer_name = validate_customer_name(&raw.fields[0])
                    .map_err(|reason| malformed(source, &raw, ORDER_COLUMNS[0], reason))?;
                let order_date = parse_order_date(&raw.fields[1])
                    .map_err(|reason| malformed(source, &raw, ORDER_COLUMNS[1], reason))?;
                let order_value = parse_money(&raw.fields[2])
                    .map_err(|reason| malformed(source, &raw, ORDER_COLUMNS[2], reason))?;

                Ok(OrderRecord {
                    line: raw.line,
                    customer_name,
                    order_date,
                    order_value,
                })
            })
            .collect()
    }

    /// 读取并解析客户文件
    pub fn parse_customer_file(&self, path: &Path) -> ImportResult<Vec<CustomerRecord>> {
        let text = Self::read_file(path)?;
        self.parse_customers(&path.display().to_string(), &text)
    }

    /// 读取并解析订单文件
    pub fn parse_order_file(&self, path: &Path) -> ImportResult<Vec<OrderRecord>> {
        let text = Self::read_file(path)?;
        self.parse_orders(&path.display().to_string(), &text)
    }

    // 无引号模式下按分隔符拼回即为原始行
    fn join(&self, record: &StringRecord) -> String {
        let separator = (self.delimiter as char).to_string();
        record.iter().collect::<Vec<_>>().join(&separator)
    }
}

fn malformed(source: &str, raw: &RawLine, field: &str, reason: String) -> ImportError {
    ImportError::MalformedRecord {
        file: source.to_string(),
        line: raw.line,
        field: field.to_string(),
        content: raw.content.clone(),
        reason,
    }
}

// ==========================================
// 订单导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 任一错误均中止当前导入，不做“尽力而为”的部分导入
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    // ===== 记录解析错误 =====
    #[error("记录格式错误 ({file} 第 {line} 行, 字段 {field}): {reason} | 原始内容: {content:?}")]
    MalformedRecord {
        file: String,
        line: u64,
        field: String,
        content: String,
        reason: String,
    },

    // ===== 引用解析错误 =====
    #[error("未知客户: {name:?}{}", describe_line(.line))]
    UnknownCustomer { name: String, line: Option<u64> },

    #[error("客户名称重复: {name:?} (第 {line} 行, 与{first_seen}冲突)")]
    DuplicateName {
        name: String,
        line: u64,
        first_seen: String,
    },

    // ===== 数据库错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn describe_line(line: &Option<u64>) -> String {
    match line {
        Some(l) => format!(" (订单文件第 {} 行)", l),
        None => String::new(),
    }
}

impl ImportError {
    /// 为未知客户错误补充行号（其他错误原样返回）
    pub fn with_line(self, at: u64) -> Self {
        match self {
            ImportError::UnknownCustomer { name, .. } => ImportError::UnknownCustomer {
                name,
                line: Some(at),
            },
            other => other,
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

// ==========================================
// 订单导入系统 - 操作类型
// ==========================================

use clap::ValueEnum;
use std::fmt;

/// 可执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// 导入客户文件与订单文件
    Import,
    /// 删除全部订单与客户
    Clean,
    /// 报告超出信用额度的客户
    Check,
    /// 依次执行 clean → import → check
    Full,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Import => write!(f, "import"),
            Operation::Clean => write!(f, "clean"),
            Operation::Check => write!(f, "check"),
            Operation::Full => write!(f, "full"),
        }
    }
}

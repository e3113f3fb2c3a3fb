// ==========================================
// 订单导入系统 - 命令行参数
// ==========================================

use crate::app::Operation;
use clap::Parser;

/// 客户/订单批量导入与信用额度校验
#[derive(Parser, Debug)]
#[command(name = "order-import")]
#[command(about = "客户/订单批量导入与信用额度校验", long_about = None)]
pub struct CliArgs {
    /// 要执行的操作
    #[arg(value_enum, value_name = "OPERATION")]
    pub operation: Operation,
}

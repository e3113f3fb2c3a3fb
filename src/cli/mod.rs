// ==========================================
// 订单导入系统 - 命令行层
// ==========================================
// 职责: 解析唯一的位置参数（操作名）
// ==========================================

pub mod args;

pub use args::CliArgs;

use clap::Parser;

/// 解析命令行参数（非法参数时由 clap 输出到 stderr 并以退出码 2 结束）
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

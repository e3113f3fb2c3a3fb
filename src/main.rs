// ==========================================
// 订单导入系统 - 命令行入口
// ==========================================
// 用法: order-import <import|clean|check|full>
// 退出码: 0 成功 / 1 操作失败 / 2 参数非法（clap）
// ==========================================

use order_import::{cli, logging, AppConfig, OperationRunner};
use std::process::ExitCode;

fn main() -> ExitCode {
    // 参数非法时 clap 直接输出错误并退出，不执行任何操作
    let args = cli::parse_args();

    // 初始化日志系统
    logging::init();

    tracing::info!("{} v{}", order_import::APP_NAME, order_import::VERSION);

    match run(args.operation) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "操作失败");
            eprintln!("错误: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(operation: order_import::Operation) -> anyhow::Result<order_import::OperationReport> {
    let config = AppConfig::load()?;
    let runner = OperationRunner::new(config);
    Ok(runner.run(operation)?)
}

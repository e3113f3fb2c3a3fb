// ==========================================
// 订单导入系统 - 配置层
// ==========================================
// 职责: 连接串、输入文件路径、分隔符
// 存储: appsettings.json + 环境变量
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{
    get_default_db_path, AppConfig, ConfigError, ConfigResult, CONFIG_PATH_ENV, DB_PATH_ENV,
};

// ==========================================
// 订单导入系统 - 应用层错误类型
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("数据库错误: {0}")]
    Repository(#[from] RepositoryError),
}

pub type AppResult<T> = Result<T, AppError>;

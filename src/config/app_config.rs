// ==========================================
// 订单导入系统 - 应用配置
// ==========================================
// 来源: appsettings.json（可缺省）+ 环境变量覆写
// ==========================================
// 文件格式:
// {
//   "ConnectionStrings": { "DefaultConnection": "order_import.db" },
//   "ImportFiles": { "CustomerFile": "customers.txt", "OrderFile": "orders.txt", "Delimiter": "\t" }
// }
// ==========================================

use crate::importer::DEFAULT_DELIMITER;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "ORDER_IMPORT_CONFIG";

/// 数据库路径环境变量（优先于配置文件）
pub const DB_PATH_ENV: &str = "ORDER_IMPORT_DB_PATH";

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "appsettings.json";

pub const DEFAULT_CUSTOMER_FILE: &str = "customers.txt";
pub const DEFAULT_ORDER_FILE: &str = "orders.txt";

// ==========================================
// ConfigError
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    Read { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value:?}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// 配置文件结构（字段名与 appsettings.json 一致）
// ==========================================
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SettingsFile {
    #[serde(default)]
    connection_strings: ConnectionStrings,
    #[serde(default)]
    import_files: ImportFiles,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConnectionStrings {
    default_connection: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImportFiles {
    customer_file: Option<PathBuf>,
    order_file: Option<PathBuf>,
    delimiter: Option<String>,
}

// ==========================================
// AppConfig - 运行时配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub customer_file: PathBuf,
    pub order_file: PathBuf,
    pub delimiter: u8,
}

impl AppConfig {
    /// 加载配置: 配置文件（ORDER_IMPORT_CONFIG 或 ./appsettings.json）+ 环境变量覆写
    pub fn load() -> ConfigResult<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config = Self::from_file(&path)?.with_db_path_override(std::env::var(DB_PATH_ENV).ok());
        info!(
            db_path = %config.db_path,
            customer_file = %config.customer_file.display(),
            order_file = %config.order_file.display(),
            "配置加载完成"
        );
        Ok(config)
    }

    /// 从配置文件加载（文件不存在时使用默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::from_settings(SettingsFile::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let settings: SettingsFile = serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::from_settings(settings)
    }

    /// 从 JSON 文本加载
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let settings: SettingsFile = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        Self::from_settings(settings)
    }

    /// 以显式数据库路径覆写（空白值忽略）
    pub fn with_db_path_override(mut self, db_path: Option<String>) -> Self {
        if let Some(path) = db_path {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                self.db_path = trimmed.to_string();
            }
        }
        self
    }

    fn from_settings(settings: SettingsFile) -> ConfigResult<Self> {
        let delimiter = match settings.import_files.delimiter {
            Some(raw) => parse_delimiter(&raw)?,
            None => DEFAULT_DELIMITER,
        };

        let db_path = settings
            .connection_strings
            .default_connection
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(get_default_db_path);

        Ok(Self {
            db_path,
            customer_file: settings
                .import_files
                .customer_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CUSTOMER_FILE)),
            order_file: settings
                .import_files
                .order_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDER_FILE)),
            delimiter,
        })
    }
}

/// 分隔符必须为单个 ASCII 字符
fn parse_delimiter(raw: &str) -> ConfigResult<u8> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(ConfigError::InvalidValue {
            key: "ImportFiles:Delimiter".to_string(),
            value: raw.to_string(),
            message: "分隔符必须为单个 ASCII 字符".to_string(),
        }),
    }
}

/// 默认数据库路径: <用户数据目录>/order-import/order_import.db
///
/// 仅计算路径，目录在打开存储时创建
pub fn get_default_db_path() -> String {
    let path = match dirs::data_dir() {
        Some(data_dir) => data_dir.join("order-import").join("order_import.db"),
        None => PathBuf::from("./order_import.db"),
    };

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_settings() {
        let config = AppConfig::from_json_str(
            r#"{
                "ConnectionStrings": { "DefaultConnection": "data/orders.db" },
                "ImportFiles": { "CustomerFile": "in/c.txt", "OrderFile": "in/o.txt", "Delimiter": ";" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.db_path, "data/orders.db");
        assert_eq!(config.customer_file, PathBuf::from("in/c.txt"));
        assert_eq!(config.order_file, PathBuf::from("in/o.txt"));
        assert_eq!(config.delimiter, b';');
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_json_str("{}").unwrap();

        assert!(config.db_path.ends_with("order_import.db"));
        assert_eq!(config.customer_file, PathBuf::from(DEFAULT_CUSTOMER_FILE));
        assert_eq!(config.order_file, PathBuf::from(DEFAULT_ORDER_FILE));
        assert_eq!(config.delimiter, b'\t');
    }

    #[test]
    fn test_tab_delimiter_escape() {
        let config = AppConfig::from_json_str(r#"{ "ImportFiles": { "Delimiter": "\t" } }"#).unwrap();
        assert_eq!(config.delimiter, b'\t');
    }

    #[test]
    fn test_invalid_delimiter() {
        for raw in [r#""""#, r#""ab""#, r#""é""#] {
            let json = format!(r#"{{ "ImportFiles": {{ "Delimiter": {} }} }}"#, raw);
            let result = AppConfig::from_json_str(&json);
            assert!(matches!(result, Err(ConfigError::InvalidValue { .. })), "{}", raw);
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AppConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::from_file(Path::new("definitely_missing_appsettings.json")).unwrap();
        assert_eq!(config.customer_file, PathBuf::from(DEFAULT_CUSTOMER_FILE));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "ConnectionStrings": {{ "DefaultConnection": "x.db" }} }}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.db_path, "x.db");
    }

    #[test]
    fn test_db_path_override() {
        let config = AppConfig::from_json_str(r#"{ "ConnectionStrings": { "DefaultConnection": "a.db" } }"#)
            .unwrap()
            .with_db_path_override(Some("  b.db ".to_string()));
        assert_eq!(config.db_path, "b.db");

        let unchanged = config.clone().with_db_path_override(Some("   ".to_string()));
        assert_eq!(unchanged.db_path, "b.db");
        assert_eq!(unchanged.clone().with_db_path_override(None), unchanged);
    }
}

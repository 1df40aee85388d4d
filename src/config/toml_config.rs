use crate::core::{ConfigProvider, StorageFormat};
use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::{validate, FieldRule, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
    pub books: Option<BooksConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub format: Option<StorageFormat>,
    pub autoload: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BooksConfig {
    #[serde(default)]
    pub preload: Vec<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AddressBookError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ADDRESS_BOOK_DATA})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_path("storage.data_dir", &self.storage.data_dir)?;

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level) {
                return Err(AddressBookError::ConfigError {
                    message: format!(
                        "logging.level '{}' must be one of: {}",
                        level,
                        LOG_LEVELS.join(", ")
                    ),
                });
            }
        }

        let mut seen = HashSet::new();
        for name in self.preload_books() {
            if name.trim().is_empty() {
                return Err(AddressBookError::ConfigError {
                    message: "books.preload contains an empty name".to_string(),
                });
            }
            if !validate(name, FieldRule::BookName) {
                return Err(AddressBookError::ConfigError {
                    message: format!("books.preload name '{}' {}", name, FieldRule::BookName.reason()),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(AddressBookError::ConfigError {
                    message: format!("books.preload lists '{}' more than once", name),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn format(&self) -> StorageFormat {
        self.storage.format.unwrap_or(StorageFormat::Json)
    }

    fn autoload(&self) -> bool {
        self.storage.autoload.unwrap_or(false)
    }

    fn preload_books(&self) -> &[String] {
        self.books.as_ref().map(|b| b.preload.as_slice()).unwrap_or(&[])
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

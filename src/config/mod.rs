#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, StorageFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Effective configuration after merging the TOML file with command-line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: String,
    pub format: StorageFormat,
    pub autoload: bool,
    pub preload_books: Vec<String>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            format: StorageFormat::Json,
            autoload: false,
            preload_books: Vec::new(),
            log_level: None,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            data_dir: config.data_dir().to_string(),
            format: config.format(),
            autoload: config.autoload(),
            preload_books: config.preload_books().to_vec(),
            log_level: config.log_level().map(str::to_string),
            json_logs: config.json_logs(),
        }
    }

    /// Level for the crate's own logs: `--verbose` forces `debug`, otherwise
    /// `[logging] level`, otherwise `info`.
    pub fn effective_log_level(&self, verbose: bool) -> &str {
        if verbose {
            return "debug";
        }
        self.log_level.as_deref().unwrap_or("info")
    }

    /// 命令列參數優先於設定檔
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &cli::CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Self::from_toml(&config)
            }
            None => Self::default(),
        };

        if let Some(data_dir) = &cli.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        settings.autoload |= cli.autoload;
        settings.json_logs |= cli.json_logs;

        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn format(&self) -> StorageFormat {
        self.format
    }

    fn autoload(&self) -> bool {
        self.autoload
    }

    fn preload_books(&self) -> &[String] {
        &self.preload_books
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)
    }
}

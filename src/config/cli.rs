use crate::core::StorageFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "address-book")]
#[command(about = "Manage named address books of personal contacts")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory where address book files are kept
    #[arg(long)]
    pub data_dir: Option<String>,

    /// File format used for save/load: txt, csv or json
    #[arg(long)]
    pub format: Option<StorageFormat>,

    /// Load <book>.<format> when a book is created
    #[arg(long)]
    pub autoload: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

use anyhow::Context;
use clap::Parser;
use small_address_book::app::menu::Menu;
use small_address_book::core::ConfigProvider;
use small_address_book::utils::logger;
use small_address_book::{CliConfig, LocalStorage, Settings};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證配置
    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let level = settings.effective_log_level(cli.verbose);
    if settings.json_logs {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(level);
    }

    tracing::info!("Starting address book");
    tracing::debug!("Settings: {:?}", settings);

    let storage = LocalStorage::new(settings.data_dir());
    let stdin = std::io::stdin();
    let mut menu = Menu::new(&settings, storage, stdin.lock(), std::io::stdout());

    // 個別失敗已在 preload 中回報
    let preloaded = menu.preload(&settings).context("failed to report preloaded address books")?;
    tracing::debug!("Preloaded {} of {} address books", preloaded, settings.preload_books.len());
    menu.run().context("interactive session failed")?;

    tracing::info!("Address book closed");
    Ok(())
}

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::Settings;
pub use crate::core::{address_book::AddressBook, system::AddressBookSystem};
pub use domain::model::{Contact, ContactUpdate, SortKey, StorageFormat};
pub use utils::error::{AddressBookError, Result};

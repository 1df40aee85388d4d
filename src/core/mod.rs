pub mod address_book;
pub mod formats;
pub mod system;

pub use crate::domain::model::{Contact, ContactUpdate, SortKey, StorageFormat};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;

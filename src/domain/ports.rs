use crate::domain::model::StorageFormat;
use crate::utils::error::Result;

/// File access for address book snapshots. Paths are relative to the storage root.
pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn format(&self) -> StorageFormat;
    fn autoload(&self) -> bool;
    fn preload_books(&self) -> &[String];
}

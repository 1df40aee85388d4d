use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Snapshots stored as plain files under a data directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Joins `path` onto the base directory. Only plain relative names are
    /// accepted; anything that could resolve outside the base is refused.
    fn full_path(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        let plain = relative.components().count() > 0
            && relative.components().all(|c| matches!(c, Component::Normal(_)))
            && !path.contains('\\');
        if !plain {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Refusing path outside the data directory: {}", path),
            ));
        }
        Ok(self.base_path.join(relative))
    }
}

impl Storage for LocalStorage {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.full_path(path)?)?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // 非原子寫入：失敗時檔案可能只寫了一部分
        fs::write(full_path, data)?;
        Ok(())
    }
}

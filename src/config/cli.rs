use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Filesystem storage. Relative paths resolve against `base_path`.
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

    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        tokio_test::block_on(storage.write_file("nested/deeper/out.csv", b"a,b\n")).unwrap();
        let data = tokio_test::block_on(storage.read_file("nested/deeper/out.csv")).unwrap();

        assert_eq!(data, b"a,b\n");
    }

    #[test]
    fn test_absolute_paths_ignore_base() {
        let dir = TempDir::new().unwrap();
        let absolute = dir.path().join("abs.csv");
        let storage = LocalStorage::new("/definitely/not/used");

        tokio_test::block_on(storage.write_file(absolute.to_str().unwrap(), b"x")).unwrap();
        assert!(absolute.exists());
    }
}

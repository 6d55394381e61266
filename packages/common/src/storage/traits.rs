use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;

use super::error::StorageError;

/// Path-addressed media storage. Paths are relative, `/`-separated.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Write `data` to `path`, replacing whatever was there.
    async fn put(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Read the whole file at `path`.
    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether a file exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Delete the file at `path`.
    ///
    /// Returns `true` if the file was deleted, `false` if it did not exist.
    async fn delete(&self, path: &str) -> Result<bool, StorageError>;

    /// Return `path` if it is free, otherwise a variant with a random suffix
    /// appended to the file stem.
    async fn available_path(&self, path: &str) -> Result<String, StorageError> {
        if !self.exists(path).await? {
            return Ok(path.to_string());
        }

        let (dir, file) = match path.rfind('/') {
            Some(pos) => (&path[..=pos], &path[pos + 1..]),
            None => ("", path),
        };
        let (stem, ext) = match file.rfind('.') {
            Some(pos) if pos > 0 => (&file[..pos], &file[pos..]),
            _ => (file, ""),
        };

        loop {
            let suffix: String = rand::rng()
                .sample_iter(&Alphanumeric)
                .take(7)
                .map(char::from)
                .collect();
            let candidate = format!("{dir}{stem}_{suffix}{ext}");
            if !self.exists(&candidate).await? {
                return Ok(candidate);
            }
        }
    }
}

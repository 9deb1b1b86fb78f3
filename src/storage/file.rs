use std::path::PathBuf;

use async_trait::async_trait;

use super::defaults::{validate_key, SharedDefaults, StorageError};

/// Shared defaults as one JSON file per key. Writes go to a temporary file
/// that is renamed over the target.
#[derive(Debug, Clone)]
pub struct FileDefaults {
    root: PathBuf,
}

impl FileDefaults {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl SharedDefaults for FileDefaults {
    async fn data(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_data(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let temp = self
            .root
            .join(format!("{}.json.{}.tmp", key, std::process::id()));
        tokio::fs::write(&temp, value).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_and_reads_blob() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = FileDefaults::new(temp_dir.path().join("group"));

        defaults.set_data("savedEvents", b"[]").await.unwrap();

        assert!(temp_dir.path().join("group").join("savedEvents.json").exists());
        assert_eq!(defaults.data("savedEvents").await.unwrap(), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn leaves_no_temp_files_behind() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = FileDefaults::new(temp_dir.path().to_path_buf());

        defaults.set_data("savedEvents", b"[1]").await.unwrap();
        defaults.set_data("savedEvents", b"[2]").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["savedEvents.json".to_string()]);
    }

    #[tokio::test]
    async fn missing_file_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = FileDefaults::new(temp_dir.path().to_path_buf());

        assert!(defaults.data("savedEvents").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn removing_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = FileDefaults::new(temp_dir.path().to_path_buf());

        defaults.remove("savedEvents").await.unwrap();
    }

    #[tokio::test]
    async fn invalid_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let defaults = FileDefaults::new(temp_dir.path().to_path_buf());

        let err = defaults.set_data("..", b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}

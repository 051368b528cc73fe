use std::path::PathBuf;

use async_trait::async_trait;

use super::{ImageStore, ImageStoreError, is_plain_file_name};

/// URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "uploads";

/// Stores images in a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_for(&self, image_path: &str) -> Result<PathBuf, ImageStoreError> {
        image_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| is_plain_file_name(name))
            .map(|name| self.root.join(name))
            .ok_or_else(|| ImageStoreError::InvalidPath(image_path.to_string()))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ImageStoreError> {
        if !is_plain_file_name(file_name) {
            return Err(ImageStoreError::InvalidPath(file_name.to_string()));
        }

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(file_name), bytes).await?;

        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    async fn delete(&self, image_path: &str) -> Result<(), ImageStoreError> {
        let file = self.file_for(image_path)?;
        tokio::fs::remove_file(file).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path().join("uploads"));

        let path = store
            .store("20251018_101500_final.png", b"png-bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(path, "uploads/20251018_101500_final.png");
        let on_disk = dir.path().join("uploads/20251018_101500_final.png");
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"png-bytes");

        store.delete(&path).await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let err = store.delete("uploads/gone.png").await.unwrap_err();
        assert!(matches!(err, ImageStoreError::Io(_)));
    }

    #[tokio::test]
    async fn test_paths_outside_the_upload_dir_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        for path in [
            "uploads/../Cargo.toml",
            "../uploads/x.png",
            "https://res.cloudinary.com/demo/image/upload/x.png",
            "uploads/",
        ] {
            let err = store.delete(path).await.unwrap_err();
            assert!(matches!(err, ImageStoreError::InvalidPath(_)), "{path}");
        }

        let err = store.store("../escape.png", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ImageStoreError::InvalidPath(_)));
    }
}

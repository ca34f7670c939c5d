use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use super::{FeeAmount, StorageDriver};
use crate::asset::{AssetFile, UploadMode};
use crate::consts::{DEFAULT_COST_PER_BYTE, storage_root, storage_uri_prefix};
use crate::errors::StorageError;

#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// Directory files are copied from when an upload is a disk reference.
    pub upload_root: Option<PathBuf>,
    pub cost_per_byte: u64,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            upload_root: None,
            cost_per_byte: DEFAULT_COST_PER_BYTE,
        }
    }
}

/// Mock storage backend persisting uploads to a local directory.
///
/// Each driver owns one storage space: a folder under the storage root plus
/// a matching URI prefix. Uploaded files are kept in an in-memory cache
/// keyed by URI so downloads return the exact record that was uploaded,
/// without a disk re-read. The cache is unbounded and process-lifetime,
/// which is fine for its test-fixture purpose.
#[derive(Debug)]
pub struct MockStorageDriver {
    storage_id: String,
    storage_dir: PathBuf,
    base_uri: String,
    cost_per_byte: u64,
    upload_root: Option<PathBuf>,
    cache: RwLock<HashMap<String, AssetFile>>,
}

impl MockStorageDriver {
    /// Creates the driver and its storage directory. Fails if `storage_id`
    /// is not a plain, space-free path segment.
    pub fn new(
        storage_id: impl Into<String>,
        options: DriverOptions,
    ) -> Result<Self, StorageError> {
        let storage_id = storage_id.into();
        validate_storage_id(&storage_id)?;

        let storage_dir = storage_root().join(&storage_id);
        std::fs::create_dir_all(&storage_dir)?;

        let base_uri = Self::storage_uri(&storage_id);
        tracing::info!("mock storage driver for '{storage_id}' initialized");
        tracing::debug!(
            upload_root = ?options.upload_root,
            storage_dir = %storage_dir.display(),
            %base_uri,
        );

        Ok(Self {
            storage_id,
            storage_dir,
            base_uri,
            cost_per_byte: options.cost_per_byte,
            upload_root: options.upload_root,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// URI prefix all uploads for `storage_id` resolve under.
    pub fn storage_uri(storage_id: &str) -> String {
        format!("{}/{storage_id}", storage_uri_prefix())
    }

    pub fn storage_id(&self) -> &str {
        &self.storage_id
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    async fn accessible_upload_root(&self) -> Result<&Path, StorageError> {
        let root = self.upload_root.as_deref().ok_or_else(|| {
            StorageError::PreconditionFailed(
                "upload root needs to be set to load from the file system".to_string(),
            )
        })?;

        if fs::metadata(root).await.is_err() {
            return Err(StorageError::PreconditionFailed(format!(
                "upload root '{}' must be accessible, but is not",
                root.display()
            )));
        }

        Ok(root)
    }
}

#[async_trait]
impl StorageDriver for MockStorageDriver {
    fn get_price(&self, file: &AssetFile) -> FeeAmount {
        FeeAmount::from_units(file.size() * self.cost_per_byte)
    }

    async fn upload(&self, file: AssetFile) -> Result<String, StorageError> {
        tracing::trace!(?file);

        let uri = format!("{}/{}", self.base_uri, file.unique_name);
        let dst = self.storage_dir.join(&file.unique_name);

        match file.effective_upload_mode() {
            UploadMode::CopyFromUploadRoot => {
                let root = self.accessible_upload_root().await?;
                let src = root.join(&file.file_name);
                fs::copy(&src, &dst).await?;
            }
            _ => fs::write(&dst, &file.buffer).await?,
        }

        tracing::debug!(
            "uploaded {}:{} to {}",
            file.display_name,
            file.unique_name,
            dst.display()
        );

        // Insert only after the bytes are on disk; a racing download sees
        // "not found" instead of a half-written file.
        self.cache.write().await.insert(uri.clone(), file);

        Ok(uri)
    }

    async fn download(&self, uri: &str) -> Result<AssetFile, StorageError> {
        self.cache
            .read()
            .await
            .get(uri)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(uri.to_string()))
    }
}

fn validate_storage_id(id: &str) -> Result<(), StorageError> {
    let is_plain_segment = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.contains(char::is_whitespace);

    if is_plain_segment {
        Ok(())
    } else {
        Err(StorageError::InvalidIdentifier(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_segments() {
        for id in ["nft-fixtures", "run_42", "a.b"] {
            assert!(validate_storage_id(id).is_ok(), "{id} should be valid");
        }
    }

    #[test]
    fn rejects_spaces_separators_and_dot_segments() {
        for id in ["has space", "tab\there", "a/b", "a\\b", "", ".", ".."] {
            assert!(
                matches!(
                    validate_storage_id(id),
                    Err(StorageError::InvalidIdentifier(_))
                ),
                "{id:?} should be rejected"
            );
        }
    }
}

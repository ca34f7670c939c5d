use mime::Mime;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::StorageError;

/// How [`crate::storage::StorageDriver::upload`] persists a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    /// Derive the mode from the file itself: a JSON content type or a
    /// non-empty buffer means a direct buffer write, anything else is
    /// copied from the configured upload root.
    #[default]
    Auto,
    WriteBuffer,
    CopyFromUploadRoot,
}

/// A file handed to the storage backend by the minting toolkit.
///
/// Carries the raw bytes plus the metadata the toolkit attaches: a unique
/// name (used as filename and URI suffix), a human-facing display name, the
/// on-disk source name, and an optional content type.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetFile {
    pub buffer: Vec<u8>,
    pub unique_name: String,
    pub display_name: String,
    pub file_name: String,
    pub content_type: Option<Mime>,
    pub upload_mode: UploadMode,
}

impl AssetFile {
    /// In-memory file. The unique name defaults to a fresh UUID so two
    /// uploads of the same source never collide unless the caller says so.
    pub fn from_bytes(buffer: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            buffer: buffer.into(),
            unique_name: Uuid::new_v4().to_string(),
            display_name: file_name.clone(),
            file_name,
            content_type: None,
            upload_mode: UploadMode::Auto,
        }
    }

    /// JSON metadata file, serialized from `value`.
    pub fn from_json<T: Serialize>(
        value: &T,
        file_name: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let buffer = serde_json::to_vec(value)?;
        Ok(Self::from_bytes(buffer, file_name).with_content_type(mime::APPLICATION_JSON))
    }

    /// Reference to a file that lives in the upload root and should be
    /// copied from disk instead of uploaded from memory.
    pub fn from_disk_reference(file_name: impl Into<String>) -> Self {
        let mut file = Self::from_bytes(Vec::new(), file_name);
        file.upload_mode = UploadMode::CopyFromUploadRoot;
        file
    }

    pub fn with_unique_name(mut self, unique_name: impl Into<String>) -> Self {
        self.unique_name = unique_name.into();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_content_type(mut self, content_type: Mime) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_upload_mode(mut self, upload_mode: UploadMode) -> Self {
        self.upload_mode = upload_mode;
        self
    }

    pub fn size(&self) -> u64 {
        self.buffer.len() as u64
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.essence_str() == mime::APPLICATION_JSON.essence_str())
    }

    /// Resolves [`UploadMode::Auto`] against the file's content.
    pub fn effective_upload_mode(&self) -> UploadMode {
        match self.upload_mode {
            UploadMode::Auto if self.is_json() || !self.buffer.is_empty() => {
                UploadMode::WriteBuffer
            }
            UploadMode::Auto => UploadMode::CopyFromUploadRoot,
            mode => mode,
        }
    }
}

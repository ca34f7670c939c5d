pub mod asset;
pub mod consts;
pub mod errors;
pub mod storage;

pub use asset::{AssetFile, UploadMode};
pub use errors::StorageError;
pub use storage::{DriverOptions, FeeAmount, MockStorageDriver, StorageDriver, download_json};

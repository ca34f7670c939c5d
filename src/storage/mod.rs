mod mock_driver;

pub use mock_driver::{DriverOptions, MockStorageDriver};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::asset::AssetFile;
use crate::errors::StorageError;

/// Price for storing a file, in the chain's base token units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FeeAmount(u64);

impl FeeAmount {
    pub fn from_units(units: u64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u64 {
        self.0
    }
}

/// Storage backend seam the minting toolkit routes its calls through.
/// The mock driver is the only implementation here; a real driver would
/// talk to the decentralized network instead.
#[async_trait]
pub trait StorageDriver: Send + Sync + 'static {
    /// Quoted price for storing `file`, no I/O involved.
    fn get_price(&self, file: &AssetFile) -> FeeAmount;

    /// Persist `file` and return the URI it can be downloaded under.
    async fn upload(&self, file: AssetFile) -> Result<String, StorageError>;

    /// Fetch a previously uploaded file by its URI.
    async fn download(&self, uri: &str) -> Result<AssetFile, StorageError>;
}

/// Downloads `uri` and decodes its content as JSON into `T`.
pub async fn download_json<T, D>(driver: &D, uri: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned,
    D: StorageDriver + ?Sized,
{
    let file = driver.download(uri).await?;
    Ok(serde_json::from_slice(&file.buffer)?)
}

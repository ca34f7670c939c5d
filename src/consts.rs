use std::path::PathBuf;

/// Port the fixture server listens on; the URI prefix points at it so
/// uploaded files can be fetched with curl while a test run is inspected.
pub const DEFAULT_STORAGE_PORT: u16 = 7667;

/// Price charged per uploaded byte when the caller does not override it.
pub const DEFAULT_COST_PER_BYTE: u64 = 1;

/// Root directory under which every storage space gets its own folder.
pub fn storage_root() -> PathBuf {
    std::env::temp_dir().join("mintstash-storage")
}

pub fn storage_uri_prefix() -> String {
    format!("http://localhost:{DEFAULT_STORAGE_PORT}")
}

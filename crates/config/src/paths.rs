//! Path helpers for errand's on-disk layout.

use std::path::PathBuf;

/// Data directory (~/.errand)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .expect("failed to locate home directory")
        .join(".errand")
}

/// Config file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

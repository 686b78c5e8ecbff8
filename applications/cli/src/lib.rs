//! Supernote Sync CLI Library
//!
//! One-way sync from a Supernote device's browse server to a local
//! directory. This library exposes the config and startup pieces for
//! testing purposes.

pub mod config;
pub mod error;
pub mod output;

// Re-export commonly used types for convenience
pub use config::{DeviceSettings, SyncConfig, SyncSettings};
pub use error::{CliError, Result};
pub use output::prepare_output_dir;

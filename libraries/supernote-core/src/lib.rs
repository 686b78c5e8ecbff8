//! Supernote Sync Core
//!
//! Shared domain types for the Supernote sync tool.
//!
//! This crate defines:
//! - **Remote types**: `RemoteFile`, `DeviceInfo` — what the device exposes
//! - **Sync reporting**: `FileAction`, `FileOutcome`, `PassReport`
//!
//! # Example
//!
//! ```rust
//! use supernote_core::types::RemoteFile;
//!
//! let file = RemoteFile::new("/Note/a.note", "a.note", 1024);
//! assert!(!file.is_directory);
//! assert_eq!(file.name, "a.note");
//! ```

#![forbid(unsafe_code)]

pub mod types;

// Re-export commonly used types
pub use types::{DeviceInfo, FileAction, FileOutcome, PassReport, RemoteFile, SyncTrigger};

//! Supernote Device Client
//!
//! HTTP client for the device's built-in "Browse & Access" web server.
//!
//! The device serves plain HTML pages that embed a directory listing as a
//! single-quoted JSON literal (`const json = '...'`). This crate extracts
//! that payload and exposes it as typed listings, plus streaming file
//! downloads.
//!
//! # Example
//!
//! ```ignore
//! use supernote_device_client::DeviceClient;
//!
//! let client = DeviceClient::new("http://192.168.1.20:8089")?;
//! let files = client.list_files().await?;
//! for file in &files {
//!     println!("{} ({} bytes)", file.uri, file.size);
//! }
//! ```

mod client;
mod error;
mod listing;
mod types;

// Re-export main types
pub use client::DeviceClient;
pub use error::{DeviceClientError, Result};
pub use types::DownloadProgress;

/// Marker line that identifies a browse page carrying an embedded listing.
pub const LISTING_MARKER: &str = "const json = '";

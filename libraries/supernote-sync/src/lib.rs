//! Supernote Sync Engine
//!
//! One-way device-to-local sync: compare the device's file listing against
//! a persisted manifest, download what is new or changed, and report a
//! per-file outcome. Additive only — local files are never deleted.
//!
//! The watch loop re-runs discovery and a sync pass on an interval until
//! its shutdown flag flips.

mod engine;
mod error;
mod manifest;
mod runner;
mod watcher;

// Public exports
pub use engine::{EngineConfig, SyncEngine};
pub use error::{Result, SyncError};
pub use manifest::{Manifest, ManifestEntry, MANIFEST_FILE};
pub use runner::{DeviceSyncRunner, SyncRunner};
pub use watcher::Watcher;

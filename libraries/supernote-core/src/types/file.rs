/// Remote file types exposed by the device's browse server
use serde::{Deserialize, Serialize};

/// A file or directory entry as exposed by the device.
///
/// The `uri` is the device-side path and acts as the entry's unique
/// identifier across sync passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Device-side path, e.g. "/Note/meeting.note"
    pub uri: String,

    /// Display name, e.g. "meeting.note"
    pub name: String,

    /// Size in bytes as reported by the device
    pub size: u64,

    /// Device-reported modification date, verbatim (format is opaque)
    pub modified: Option<String>,

    /// Whether this entry is a directory
    pub is_directory: bool,
}

impl RemoteFile {
    /// Create a plain file entry.
    pub fn new(uri: impl Into<String>, name: impl Into<String>, size: u64) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            size,
            modified: None,
            is_directory: false,
        }
    }

    /// Create a directory entry.
    pub fn directory(uri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            name: name.into(),
            size: 0,
            modified: None,
            is_directory: true,
        }
    }

    /// Set the device-reported modification date.
    #[must_use]
    pub fn with_modified(mut self, modified: impl Into<String>) -> Self {
        self.modified = Some(modified.into());
        self
    }

    /// The `uri` relative to the device root, without the leading slash.
    ///
    /// Used to mirror the device tree under the local output directory.
    pub fn relative_path(&self) -> &str {
        self.uri.trim_start_matches('/')
    }
}

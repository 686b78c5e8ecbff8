//! Wire types for the device browse pages.

use serde::Deserialize;
use supernote_core::RemoteFile;

/// JSON payload embedded in a browse page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DirectoryPayload {
    pub file_list: Vec<WireEntry>,
}

/// One entry of the embedded `fileList` array.
///
/// Field names are the device's camelCase; `size` and `date` are absent on
/// some firmware versions, so they default.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEntry {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub is_directory: bool,
}

impl From<WireEntry> for RemoteFile {
    fn from(entry: WireEntry) -> Self {
        RemoteFile {
            uri: entry.uri,
            name: entry.name,
            size: entry.size,
            modified: entry.date,
            is_directory: entry.is_directory,
        }
    }
}

/// Progress information during a file download.
#[derive(Debug, Clone)]
pub struct DownloadProgress {
    /// Device-side path of the file being downloaded
    pub uri: String,
    pub bytes_received: u64,
    pub bytes_total: Option<u64>,
    /// Progress as 0.0 to 1.0 (0.0 when the total is unknown)
    pub progress: f32,
}

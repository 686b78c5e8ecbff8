//! Persisted record of which remote files have already been downloaded.
//!
//! The manifest lives inside the output directory as a JSON file mapping
//! device `uri` to the size/date that was synced. It is rewritten
//! atomically (temp file, fsync, rename) after every recorded download, so
//! an interrupted pass leaves it consistent with what was actually written.

use crate::error::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Manifest file name inside the output directory.
pub const MANIFEST_FILE: &str = ".supernote-sync.json";

/// What was recorded for one remote file at the time it was synced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub size: u64,
    pub modified: Option<String>,
    /// When the local copy was written (RFC 3339)
    pub synced_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ManifestData {
    #[serde(default)]
    entries: BTreeMap<String, ManifestEntry>,
}

/// The manifest for one output directory.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    data: ManifestData,
}

impl Manifest {
    /// Load the manifest from an output directory, empty if none exists yet.
    pub async fn load(output_dir: &Path) -> Result<Self> {
        let path = output_dir.join(MANIFEST_FILE);

        let data = match tokio::fs::read_to_string(&path).await {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ManifestData::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, data })
    }

    /// Persist the manifest durably.
    ///
    /// Writes a temp file in the same directory, fsyncs it, then renames
    /// over the final name so a crash never leaves a truncated manifest.
    pub async fn save(&self) -> Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(&self.data)?;

        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(&body).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!(path = %self.path.display(), entries = self.data.entries.len(), "Manifest saved");

        Ok(())
    }

    /// Whether the manifest already records this remote file unchanged.
    ///
    /// Size and the device's date string must both match; the date format
    /// is opaque, so it is compared verbatim.
    pub fn is_current(&self, file: &supernote_core::RemoteFile) -> bool {
        match self.data.entries.get(&file.uri) {
            Some(entry) => entry.size == file.size && entry.modified == file.modified,
            None => false,
        }
    }

    /// Record a completed download.
    pub fn record(&mut self, file: &supernote_core::RemoteFile) {
        self.data.entries.insert(
            file.uri.clone(),
            ManifestEntry {
                size: file.size,
                modified: file.modified.clone(),
                synced_at: Utc::now().to_rfc3339(),
            },
        );
    }

    /// Entry for a uri, if recorded.
    pub fn get(&self, uri: &str) -> Option<&ManifestEntry> {
        self.data.entries.get(uri)
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }
}

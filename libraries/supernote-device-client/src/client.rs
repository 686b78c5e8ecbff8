//! Main device client.

use crate::error::{DeviceClientError, Result};
use crate::listing;
use crate::types::DownloadProgress;
use futures_util::StreamExt;
use reqwest::Client;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use supernote_core::RemoteFile;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Client for a Supernote device's browse server.
///
/// # Example
///
/// ```ignore
/// use supernote_device_client::DeviceClient;
///
/// let client = DeviceClient::new("http://192.168.1.20:8089")?;
/// let root = client.list_directory("/").await?;
/// println!("{} entries at device root", root.len());
/// ```
pub struct DeviceClient {
    http: Client,
    base_url: String,
}

impl DeviceClient {
    /// Create a new client for the given device base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url: String = base_url.into();

        // Validate URL
        if base_url.is_empty() {
            return Err(DeviceClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DeviceClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        // The device serves from the local network; short timeouts keep a
        // vanished device from stalling a pass.
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(format!("supernote-sync/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeviceClientError::Request)?;

        Ok(Self { http, base_url })
    }

    /// The normalized device base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test the connection by fetching the root listing.
    ///
    /// Returns the number of entries at the device root.
    pub async fn test_connection(&self) -> Result<usize> {
        let root = self.list_directory("/").await?;
        info!(url = %self.base_url, entries = root.len(), "Connected to device");
        Ok(root.len())
    }

    /// List one directory on the device.
    ///
    /// `uri` is the device-side path; "/" lists the root.
    pub async fn list_directory(&self, uri: &str) -> Result<Vec<RemoteFile>> {
        let url = self.page_url(uri);
        debug!(url = %url, "Fetching directory listing");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DeviceClientError::DeviceUnreachable(e.to_string())
            } else {
                DeviceClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeviceClientError::DeviceError {
                status: status.as_u16(),
                message,
            });
        }

        let html = response.text().await?;
        listing::parse_directory(&html)
    }

    /// List every file on the device, walking directories breadth-first.
    ///
    /// Directory entries are expanded; only files are returned, in
    /// traversal order.
    pub async fn list_files(&self) -> Result<Vec<RemoteFile>> {
        let mut files = Vec::new();
        let mut pending = VecDeque::from(["/".to_string()]);

        while let Some(dir_uri) = pending.pop_front() {
            for entry in self.list_directory(&dir_uri).await? {
                if entry.is_directory {
                    pending.push_back(entry.uri);
                } else {
                    files.push(entry);
                }
            }
        }

        debug!(url = %self.base_url, files = files.len(), "Listed device files");
        Ok(files)
    }

    /// Download one file to `dest`, streaming the body.
    ///
    /// The caller chooses `dest`; parent directories are created as needed.
    /// `progress_callback` is invoked per received chunk.
    pub async fn download_file<F>(
        &self,
        uri: &str,
        dest: &Path,
        mut progress_callback: F,
    ) -> Result<()>
    where
        F: FnMut(DownloadProgress),
    {
        let url = self.page_url(uri);
        debug!(url = %url, dest = %dest.display(), "Downloading file");

        let response = self.http.get(&url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DeviceClientError::DeviceUnreachable(e.to_string())
            } else {
                DeviceClientError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DeviceClientError::DeviceError {
                status: status.as_u16(),
                message,
            });
        }

        let total_size = response.content_length();

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = File::create(dest).await?;
        let mut downloaded: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            let progress = total_size
                .map(|total| downloaded as f32 / total as f32)
                .unwrap_or(0.0);

            progress_callback(DownloadProgress {
                uri: uri.to_string(),
                bytes_received: downloaded,
                bytes_total: total_size,
                progress,
            });
        }

        file.flush().await?;

        info!(
            uri = %uri,
            dest = %dest.display(),
            size = downloaded,
            "File downloaded"
        );

        Ok(())
    }

    /// Full URL for a device-side path.
    fn page_url(&self, uri: &str) -> String {
        if uri == "/" || uri.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, uri)
        }
    }
}

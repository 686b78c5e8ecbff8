/// Output directory startup checks
use crate::error::{CliError, Result};
use std::path::Path;

/// Create the output directory and verify it is writable.
///
/// An unwritable output directory is the one unrecoverable configuration
/// problem, so it is checked before any sync work starts.
pub async fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
        CliError::OutputDir(format!(
            "cannot create output directory {}: {e}",
            output_dir.display()
        ))
    })?;

    let probe = output_dir.join(".supernote-sync.probe");
    tokio::fs::write(&probe, b"").await.map_err(|e| {
        CliError::OutputDir(format!(
            "output directory {} is not writable: {e}",
            output_dir.display()
        ))
    })?;
    tokio::fs::remove_file(&probe).await.ok();

    Ok(())
}

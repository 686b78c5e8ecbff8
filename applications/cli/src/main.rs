/// Supernote Sync - one-way device-to-local sync tool
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use supernote_core::SyncTrigger;
use supernote_discovery::{DeviceScanner, ScannerConfig};
use supernote_sync::{DeviceSyncRunner, EngineConfig, SyncError, SyncRunner, Watcher};
use supernote_sync_cli::config::SyncConfig;
use supernote_sync_cli::output::prepare_output_dir;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "supernote-sync")]
#[command(about = "Sync files from a Supernote device to a local directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync pass and exit
    Sync {
        /// Directory that receives the device's files
        output_dir: PathBuf,

        /// Device URL (e.g. http://192.168.1.20:8089); discovered when omitted
        #[arg(long, env = "SUPERNOTE_DEVICE_URL")]
        url: Option<String>,
    },
    /// Keep syncing on an interval until interrupted
    Watch {
        /// Directory that receives the device's files
        output_dir: PathBuf,

        /// Device URL (e.g. http://192.168.1.20:8089); discovered when omitted
        #[arg(long, env = "SUPERNOTE_DEVICE_URL")]
        url: Option<String>,

        /// Seconds to sleep between sync passes
        #[arg(long)]
        poll_interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supernote_sync=info,supernote_sync_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SyncConfig::load()?;
    config.validate()?;

    match cli.command {
        Commands::Sync { output_dir, url } => {
            sync_once(&config, &output_dir, url).await?;
        }
        Commands::Watch {
            output_dir,
            url,
            poll_interval,
        } => {
            watch_forever(&config, &output_dir, url, poll_interval).await?;
        }
    }

    Ok(())
}

async fn sync_once(
    config: &SyncConfig,
    output_dir: &Path,
    url: Option<String>,
) -> anyhow::Result<()> {
    prepare_output_dir(output_dir).await?;
    let runner = build_runner(config, output_dir, url)?;

    // One-shot mode still wires Ctrl-C to the between-files cancellation flag
    let shutdown = spawn_shutdown_flag();

    match runner.run_cycle(SyncTrigger::Manual, &shutdown).await {
        Ok(report) => {
            tracing::info!(
                files = report.files_listed,
                downloaded = report.downloaded(),
                skipped = report.skipped(),
                failed = report.failed(),
                "Sync finished"
            );
            if report.failed() > 0 {
                anyhow::bail!("{} file(s) failed to sync", report.failed());
            }
            Ok(())
        }
        Err(SyncError::DeviceNotFound) => {
            anyhow::bail!("no device found on the local network (is Browse & Access enabled?)")
        }
        Err(e) => Err(e).context("sync pass failed"),
    }
}

async fn watch_forever(
    config: &SyncConfig,
    output_dir: &Path,
    url: Option<String>,
    poll_interval: Option<u64>,
) -> anyhow::Result<()> {
    prepare_output_dir(output_dir).await?;
    let runner = build_runner(config, output_dir, url)?;

    let interval = Duration::from_secs(poll_interval.unwrap_or(config.sync.poll_interval_secs));
    tracing::info!(
        output_dir = %output_dir.display(),
        interval_secs = interval.as_secs(),
        "Watching for device changes"
    );

    let shutdown = spawn_shutdown_flag();
    Watcher::new(interval).run(runner, shutdown).await;

    Ok(())
}

/// Build the per-cycle runner: fixed URL when one is known, otherwise a
/// network scan each cycle.
fn build_runner(
    config: &SyncConfig,
    output_dir: &Path,
    url: Option<String>,
) -> anyhow::Result<DeviceSyncRunner> {
    let engine_config = EngineConfig {
        download_retries: config.sync.download_retries,
        ..EngineConfig::default()
    };

    let runner = match url.or_else(|| config.device.url.clone()) {
        Some(url) => DeviceSyncRunner::with_url(url, output_dir, engine_config),
        None => {
            let scanner_config = ScannerConfig {
                port: config.device.port,
                overall_timeout: Duration::from_secs(config.device.discovery_timeout_secs),
                ..ScannerConfig::default()
            };
            let scanner = DeviceScanner::with_http_prober(scanner_config)
                .context("failed to set up device discovery")?;
            DeviceSyncRunner::with_scanner(scanner, output_dir, engine_config)
        }
    };

    Ok(runner)
}

/// Flag that flips to true on Ctrl-C.
fn spawn_shutdown_flag() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current file");
            let _ = tx.send(true);
        }
    });

    rx
}

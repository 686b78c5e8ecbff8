//! Supernote Device Discovery
//!
//! Finds a device's browse server on the local network.
//!
//! The device announces nothing; it just serves HTTP on a fixed port. So
//! discovery is an HTTP probe sweep: enumerate candidate addresses (the /24
//! neighborhood of the local interface, plus any configured hosts), probe
//! each with a short timeout, and return the first address that answers
//! with a browse page.
//!
//! The prober sits behind a trait so tests can inject fake responses
//! instead of touching the network.

mod error;
mod prober;
mod scanner;

pub use error::{DiscoveryError, Result};
pub use prober::{DeviceProber, HttpProber};
pub use scanner::{DeviceScanner, ScannerConfig, DEFAULT_PORT};

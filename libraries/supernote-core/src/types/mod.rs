mod device;
mod file;
mod sync;

pub use device::DeviceInfo;
pub use file::RemoteFile;
pub use sync::{FileAction, FileOutcome, PassReport, SyncTrigger};

//! Descriptive queries over Linux block storage devices.
//!
//! A [`StorageDevice`] answers questions like "how big is it", "who made it"
//! and "does it spin" by asking `blockdev`, udev and sysfs. Every answer that
//! costs a process spawn or a file read is computed at most once per
//! descriptor.
//!
//! ```no_run
//! use blkinfo::StorageDevice;
//!
//! # fn main() -> Result<(), blkinfo::Error> {
//! let dev = StorageDevice::new("/dev/sda");
//! println!("{} is {} bytes", dev.device_name(), dev.size()?);
//! if !dev.is_rotational()? {
//!     println!("Solid state");
//! }
//! # Ok(())
//! # }
//! ```
pub mod class;
pub mod device;
pub mod error;
pub mod exec;
pub mod report;
pub mod sysfs;
pub mod udev;

pub use class::DeviceClass;
pub use device::{Builder, StorageDevice};
pub use error::{Error, ExecError, Result};
pub use exec::{CommandRunner, SystemRunner};
pub use report::DeviceReport;
pub use sysfs::Sysfs;
pub use udev::{UdevDatabase, UdevProperties};

//! The storage device descriptor.
use crate::{
    class::DeviceClass,
    error::{Error, Result},
    exec::{command_line, CommandRunner, SystemRunner},
    report::DeviceReport,
    sysfs::Sysfs,
    udev::{UdevDatabase, UdevProperties},
};
use byte_unit::Byte;
use std::{
    cell::OnceCell,
    fmt,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};
use tracing::{debug, trace};

const BLOCKDEV: &str = "blockdev";

/// Get the value in `cell`, computing it with `init` the first time.
///
/// A failed `init` leaves the cell empty.
fn cached<T>(cell: &OnceCell<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(v) = cell.get() {
        trace!("Cache hit");
        return Ok(v);
    }
    let v = init()?;
    Ok(cell.get_or_init(|| v))
}

/// Kernel name for `path`, resolving symlinks such as `/dev/disk/by-id/...`.
fn kernel_name(path: &Path) -> String {
    let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    canonical
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Builder for a [`StorageDevice`] with non-default collaborators.
pub struct Builder {
    device_file: PathBuf,
    runner: Option<Rc<dyn CommandRunner>>,
    udev: Option<Box<dyn UdevProperties>>,
    sysfs: Option<Sysfs>,
}

impl Builder {
    /// Run external programs with `runner` instead of [`SystemRunner`].
    pub fn runner(mut self, runner: Rc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Look up udev properties in `udev` instead of asking `udevadm`.
    pub fn udev(mut self, udev: impl UdevProperties + 'static) -> Self {
        self.udev = Some(Box::new(udev));
        self
    }

    /// Read sysfs attributes from `sysfs` instead of `/sys`.
    pub fn sysfs(mut self, sysfs: Sysfs) -> Self {
        self.sysfs = Some(sysfs);
        self
    }

    pub fn build(self) -> StorageDevice {
        let runner = self.runner.unwrap_or_else(|| Rc::new(SystemRunner));
        let device_file = self.device_file;
        let udev = self
            .udev
            .unwrap_or_else(|| Box::new(UdevDatabase::new(&device_file, runner.clone())));
        let name = kernel_name(&device_file);
        StorageDevice {
            class: DeviceClass::from_name(&name),
            name,
            device_file,
            runner,
            udev,
            sysfs: self.sysfs.unwrap_or_default(),
            size: OnceCell::new(),
            block_size: OnceCell::new(),
            sector_size: OnceCell::new(),
            model: OnceCell::new(),
            vendor: OnceCell::new(),
        }
    }
}

/// A block storage device, like `/dev/sda`.
///
/// Getters that need a process or a file read cache their result for the
/// life of the descriptor.
pub struct StorageDevice {
    device_file: PathBuf,
    name: String,
    class: DeviceClass,
    runner: Rc<dyn CommandRunner>,
    udev: Box<dyn UdevProperties>,
    sysfs: Sysfs,
    size: OnceCell<u64>,
    block_size: OnceCell<u64>,
    sector_size: OnceCell<u64>,
    model: OnceCell<String>,
    vendor: OnceCell<String>,
}

impl fmt::Debug for StorageDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageDevice")
            .field("device_file", &self.device_file)
            .field("name", &self.name)
            .field("class", &self.class)
            .finish()
    }
}

impl StorageDevice {
    /// Descriptor for `device`, using the system's `blockdev`, udev and sysfs.
    ///
    /// `device` may be a path or a bare kernel name like `sda`.
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self::builder(device).build()
    }

    pub fn builder(device: impl Into<PathBuf>) -> Builder {
        let device = device.into();
        let device_file = if device.components().count() == 1 && device.is_relative() {
            Path::new("/dev").join(device)
        } else {
            device
        };
        Builder {
            device_file,
            runner: None,
            udev: None,
            sysfs: None,
        }
    }

    /// Device file as given, like `/dev/sda` or `/dev/disk/by-id/...`.
    pub fn device_file(&self) -> &Path {
        &self.device_file
    }

    /// Kernel name, like `sda`.
    pub fn device_name(&self) -> &str {
        &self.name
    }

    /// The device file with all symlinks resolved.
    pub fn canonical_device_file(&self) -> PathBuf {
        fs::canonicalize(&self.device_file).unwrap_or_else(|_| self.device_file.clone())
    }

    pub fn class(&self) -> DeviceClass {
        self.class
    }

    pub fn exists(&self) -> bool {
        self.device_file.exists()
    }

    fn blockdev(&self, flag: &str) -> Result<u64> {
        let file = self.device_file.to_string_lossy();
        let args = [flag, &*file];
        debug!(device = %self.name, flag, "Querying blockdev");
        let lines = self.runner.run(BLOCKDEV, &args)?;
        let output = lines.first().map(|s| s.trim()).unwrap_or_default();
        output.parse().map_err(|_| Error::Parse {
            command: command_line(BLOCKDEV, &args),
            output: output.to_owned(),
        })
    }

    /// Size in bytes.
    pub fn size(&self) -> Result<u64> {
        cached(&self.size, || self.blockdev("--getsize64")).map(|v| *v)
    }

    /// Block size used by the kernel, in bytes.
    pub fn block_size(&self) -> Result<u64> {
        cached(&self.block_size, || self.blockdev("--getbsz")).map(|v| *v)
    }

    /// Logical sector size, in bytes.
    pub fn sector_size(&self) -> Result<u64> {
        cached(&self.sector_size, || self.blockdev("--getss")).map(|v| *v)
    }

    fn device_attr(&self, attr: &str) -> Result<String> {
        Ok(self.sysfs.read_attr(&self.name, attr)?.unwrap_or_default())
    }

    /// Model name, or an empty string if unknown.
    pub fn model(&self) -> Result<&str> {
        cached(&self.model, || self.device_attr("device/model")).map(String::as_str)
    }

    /// Vendor name, or an empty string if unknown.
    pub fn vendor(&self) -> Result<&str> {
        cached(&self.vendor, || self.device_attr("device/vendor")).map(String::as_str)
    }

    /// Serial number, or an empty string if unknown.
    pub fn serial_number(&self) -> String {
        self.udev
            .property("ID_SERIAL_SHORT")
            .map(|s| s.replace('_', " "))
            .unwrap_or_default()
    }

    fn udev_is(&self, name: &str, value: &str) -> bool {
        self.udev.property(name).map_or(false, |v| v == value)
    }

    /// Whether the device uses spinning platters.
    ///
    /// The first hint that is present decides. With no hints at all the
    /// model name is consulted, and failing that the device is assumed to
    /// rotate.
    pub fn is_rotational(&self) -> Result<bool> {
        if let Some(ssd) = self.udev.property("ID_SSD") {
            return Ok(ssd != "1");
        }
        if let Some(rpm) = self.udev.property("ID_ATA_ROTATION_RATE_RPM") {
            return Ok(rpm != "0");
        }
        // Drives without Automatic Acoustic Management have nothing to be quiet about.
        if let Some(aam) = self.udev.property("ID_ATA_FEATURE_SET_AAM") {
            return Ok(aam != "0");
        }
        if let Some(rotational) = self.sysfs.read_flag(&self.name, "queue/rotational")? {
            return Ok(rotational);
        }
        debug!(device = %self.name, "Falling back to model name for rotation");
        Ok(!self.model()?.contains("SSD"))
    }

    pub fn is_removable(&self) -> Result<bool> {
        Ok(self
            .sysfs
            .read_flag(&self.name, "removable")?
            .unwrap_or(false))
    }

    /// Whether the device is attached over USB.
    pub fn is_usb(&self) -> bool {
        let bus = self.udev.property("ID_BUS");
        if bus.map_or(false, |b| b.eq_ignore_ascii_case("usb")) {
            return true;
        }
        if self.udev_is("ID_USB_DRIVER", "usb-storage") {
            return true;
        }
        if self.udev_is("ID_DRIVE_THUMB", "1") {
            return true;
        }
        // Like `pci-0000:00:14.0-usb-0:2:1.0-scsi-0:0:0:0`
        self.udev.property("ID_PATH").map_or(false, |path| {
            let path = path.to_ascii_lowercase();
            path.match_indices("-usb-")
                .any(|(i, m)| i > 0 && i + m.len() < path.len())
        })
    }

    pub fn is_ata(&self) -> bool {
        self.udev_is("ID_BUS", "ata")
    }

    pub fn is_raid(&self) -> bool {
        self.class.is_raid()
    }

    pub fn is_read_only(&self) -> bool {
        self.class.is_read_only()
    }

    pub fn has_smart_support(&self) -> bool {
        self.class.has_smart_support()
    }

    /// Fail with [`Error::Assertion`] unless the device supports S.M.A.R.T.
    pub fn assert_has_smart_support(&self) -> Result<()> {
        if self.has_smart_support() {
            Ok(())
        } else {
            Err(Error::Assertion(format!(
                "Device '{}' does not support S.M.A.R.T.",
                self.device_file.display()
            )))
        }
    }

    /// Symlinks udev created for the device.
    pub fn device_links(&self) -> Vec<PathBuf> {
        self.udev
            .property("DEVLINKS")
            .map(|links| links.split_whitespace().map(PathBuf::from).collect())
            .unwrap_or_default()
    }

    fn links_under(&self, dir: &str) -> Vec<PathBuf> {
        let mut links: Vec<_> = self
            .device_links()
            .into_iter()
            .filter(|l| l.starts_with(dir))
            .collect();
        links.sort();
        links
    }

    /// A `/dev/disk/by-id` link, preferring ones not based on the WWN.
    pub fn device_file_by_id(&self) -> Option<PathBuf> {
        let links = self.links_under("/dev/disk/by-id");
        let is_wwn = |l: &PathBuf| {
            l.file_name()
                .map_or(false, |n| n.to_string_lossy().starts_with("wwn-"))
        };
        links
            .iter()
            .find(|&l| !is_wwn(l))
            .or_else(|| links.first())
            .cloned()
    }

    pub fn device_file_by_path(&self) -> Option<PathBuf> {
        self.links_under("/dev/disk/by-path").into_iter().next()
    }

    /// The most stable name for the device.
    ///
    /// `/dev/sdX` names can change between boots, by-id and by-path links
    /// don't.
    pub fn preferred_device_file(&self) -> PathBuf {
        self.device_file_by_id()
            .or_else(|| self.device_file_by_path())
            .unwrap_or_else(|| self.device_file.clone())
    }

    /// Major and minor device numbers.
    pub fn device_number(&self) -> Result<Option<(u32, u32)>> {
        let dev = match self.sysfs.read_attr(&self.name, "dev")? {
            Some(d) => d,
            None => return Ok(None),
        };
        let parsed = dev
            .split_once(':')
            .and_then(|(major, minor)| Some((major.parse().ok()?, minor.parse().ok()?)));
        Ok(parsed)
    }

    /// Human readable summary, like `Samsung SSD 860 [/dev/sda, 465.76 GiB]`.
    pub fn description(&self) -> Result<String> {
        let model = self.model()?;
        let model = if model.is_empty() { "n/a" } else { model };
        Ok(format!(
            "{} [{}, {}]",
            model,
            self.device_file.display(),
            Byte::from_bytes(self.size()?.into()).get_appropriate_unit(true)
        ))
    }

    /// Snapshot of everything known about the device.
    pub fn report(&self) -> Result<DeviceReport> {
        DeviceReport::new(self)
    }
}

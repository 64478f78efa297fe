//! Reading block device attributes from sysfs.
use crate::error::{Error, Result};
use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
};

/// Where sysfs is normally mounted.
pub const SYSFS_PATH: &str = "/sys";

/// Reader for `<root>/block/<device>/...` attributes.
///
/// A missing attribute is not an error, it means the kernel doesn't expose
/// that feature for the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sysfs {
    root: PathBuf,
}

impl Default for Sysfs {
    fn default() -> Self {
        Self::new(SYSFS_PATH)
    }
}

impl Sysfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory for block device `name`, like `/sys/block/sda`.
    pub fn block_path(&self, name: &str) -> PathBuf {
        self.root.join("block").join(name)
    }

    /// Read attribute `attr` of block device `name`, trimmed.
    ///
    /// Returns [`None`] if the attribute doesn't exist.
    pub fn read_attr(&self, name: &str, attr: &str) -> Result<Option<String>> {
        let path = self.block_path(name).join(attr);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s.trim().to_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    /// Read a `0`/`1` attribute. Anything but `1` is false.
    pub fn read_flag(&self, name: &str, attr: &str) -> Result<Option<bool>> {
        Ok(self.read_attr(name, attr)?.map(|v| v == "1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn fake() -> (TempDir, Sysfs) {
        let dir = tempfile::tempdir().unwrap();
        let dev = dir.path().join("block/sdb");
        fs::create_dir_all(dev.join("queue")).unwrap();
        fs::write(dev.join("removable"), "1\n").unwrap();
        fs::write(dev.join("queue/rotational"), "0\n").unwrap();
        fs::write(dev.join("dev"), "8:16\n").unwrap();
        let sysfs = Sysfs::new(dir.path());
        (dir, sysfs)
    }

    #[test]
    fn default_root() {
        assert_eq!(Sysfs::default().block_path("sda"), Path::new("/sys/block/sda"));
    }

    #[test]
    fn reads_trimmed_attributes() {
        let (_dir, sysfs) = fake();
        assert_eq!(sysfs.read_attr("sdb", "dev").unwrap().as_deref(), Some("8:16"));
    }

    #[test]
    fn missing_attributes_are_none() {
        let (_dir, sysfs) = fake();
        assert_eq!(sysfs.read_attr("sdb", "device/model").unwrap(), None);
        assert_eq!(sysfs.read_flag("sdc", "removable").unwrap(), None);
    }

    #[test]
    fn flags() {
        let (_dir, sysfs) = fake();
        assert_eq!(sysfs.read_flag("sdb", "removable").unwrap(), Some(true));
        assert_eq!(sysfs.read_flag("sdb", "queue/rotational").unwrap(), Some(false));
    }

    #[test]
    fn other_io_errors_propagate() {
        let (_dir, sysfs) = fake();
        // Reading a directory as a file fails with something other than NotFound.
        let err = sysfs.read_attr("sdb", "queue").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

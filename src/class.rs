//! Kinds of block devices, by kernel name.
use serde::Serialize;
use std::fmt;

/// What kind of block device a kernel name like `sda` or `nvme0n1` refers to.
///
/// The class decides the answers that depend on the driver rather than on the
/// individual device, like whether S.M.A.R.T. can be queried at all.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    /// `sdX`. SCSI, SATA, SAS and USB mass storage.
    Scsi,
    /// `hdX`. Legacy IDE.
    Ide,
    /// `nvmeXnY`
    Nvme,
    /// `vdX`
    Virtio,
    /// `xvdX`
    Xen,
    /// `mmcblkX`. SD cards and eMMC.
    Mmc,
    /// `srX`
    Optical,
    /// `mdX`. Linux software RAID.
    Raid,
    /// `dm-X`
    DeviceMapper,
    /// `loopX`
    Loop,
    Other,
}

fn has_suffix(name: &str, prefix: &str, suffix: fn(char) -> bool) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => !rest.is_empty() && rest.chars().all(suffix),
        None => false,
    }
}

fn letters(c: char) -> bool {
    c.is_ascii_lowercase()
}

fn digits(c: char) -> bool {
    c.is_ascii_digit()
}

impl DeviceClass {
    /// Classify kernel device name `name`.
    pub fn from_name(name: &str) -> Self {
        use DeviceClass::*;
        if has_suffix(name, "sd", letters) {
            Scsi
        } else if has_suffix(name, "hd", letters) {
            Ide
        } else if has_suffix(name, "vd", letters) {
            Virtio
        } else if has_suffix(name, "xvd", letters) {
            Xen
        } else if has_suffix(name, "nvme", |c| c.is_ascii_digit() || c == 'n') {
            Nvme
        } else if has_suffix(name, "mmcblk", digits) {
            Mmc
        } else if has_suffix(name, "sr", digits) {
            Optical
        } else if has_suffix(name, "md", digits) {
            Raid
        } else if has_suffix(name, "dm-", digits) {
            DeviceMapper
        } else if has_suffix(name, "loop", digits) {
            Loop
        } else {
            Other
        }
    }

    pub fn is_raid(self) -> bool {
        self == DeviceClass::Raid
    }

    pub fn is_read_only(self) -> bool {
        self == DeviceClass::Optical
    }

    /// Whether drives of this class can report S.M.A.R.T. data.
    pub fn has_smart_support(self) -> bool {
        matches!(self, DeviceClass::Scsi | DeviceClass::Ide | DeviceClass::Nvme)
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceClass::Scsi => "SCSI",
            DeviceClass::Ide => "IDE",
            DeviceClass::Nvme => "NVMe",
            DeviceClass::Virtio => "VirtIO",
            DeviceClass::Xen => "Xen",
            DeviceClass::Mmc => "MMC",
            DeviceClass::Optical => "Optical",
            DeviceClass::Raid => "RAID",
            DeviceClass::DeviceMapper => "Device Mapper",
            DeviceClass::Loop => "Loop",
            DeviceClass::Other => "Other",
        };
        f.write_str(s)
    }
}

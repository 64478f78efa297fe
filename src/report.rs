//! Serializable snapshots of a [`StorageDevice`].
use crate::{class::DeviceClass, device::StorageDevice, error::Result};
use byte_unit::Byte;
use serde::Serialize;
use std::{fmt, path::PathBuf};

/// Everything a [`StorageDevice`] can tell about itself, gathered at once.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub device_file: PathBuf,
    pub device_name: String,
    pub preferred_device_file: PathBuf,
    pub class: DeviceClass,
    /// `major:minor`
    pub device_number: Option<String>,
    pub size: u64,
    pub block_size: u64,
    pub sector_size: u64,
    pub model: String,
    pub vendor: String,
    pub serial_number: String,
    pub description: String,
    pub rotational: bool,
    pub removable: bool,
    pub usb: bool,
    pub ata: bool,
    pub raid: bool,
    pub read_only: bool,
    pub smart: bool,
}

fn yes_no(b: bool) -> String {
    let s = if b { "Yes" } else { "No" };
    s.to_owned()
}

impl DeviceReport {
    pub fn new(dev: &StorageDevice) -> Result<Self> {
        Ok(Self {
            device_file: dev.device_file().to_path_buf(),
            device_name: dev.device_name().to_owned(),
            preferred_device_file: dev.preferred_device_file(),
            class: dev.class(),
            device_number: dev
                .device_number()?
                .map(|(major, minor)| format!("{}:{}", major, minor)),
            size: dev.size()?,
            block_size: dev.block_size()?,
            sector_size: dev.sector_size()?,
            model: dev.model()?.to_owned(),
            vendor: dev.vendor()?.to_owned(),
            serial_number: dev.serial_number(),
            description: dev.description()?,
            rotational: dev.is_rotational()?,
            removable: dev.is_removable()?,
            usb: dev.is_usb(),
            ata: dev.is_ata(),
            raid: dev.is_raid(),
            read_only: dev.is_read_only(),
            smart: dev.has_smart_support(),
        })
    }

    /// Labelled values, in display order.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Device", self.device_file.display().to_string()),
            ("Stable path", self.preferred_device_file.display().to_string()),
            ("Type", self.class.to_string()),
            (
                "Number",
                self.device_number.clone().unwrap_or_else(|| "Unknown".into()),
            ),
            (
                "Size",
                format!(
                    "{} ({} bytes)",
                    Byte::from_bytes(self.size.into()).get_appropriate_unit(true),
                    self.size
                ),
            ),
            ("Block size", self.block_size.to_string()),
            ("Sector size", self.sector_size.to_string()),
            ("Model", self.model.clone()),
            ("Vendor", self.vendor.clone()),
            ("Serial", self.serial_number.clone()),
            ("Rotational", yes_no(self.rotational)),
            ("Removable", yes_no(self.removable)),
            ("USB", yes_no(self.usb)),
            ("ATA", yes_no(self.ata)),
            ("RAID", yes_no(self.raid)),
            ("Read only", yes_no(self.read_only)),
            ("S.M.A.R.T.", yes_no(self.smart)),
        ]
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;
        for (label, value) in self.fields() {
            writeln!(f, "  {:<12} {}", format!("{}:", label), value)?;
        }
        Ok(())
    }
}

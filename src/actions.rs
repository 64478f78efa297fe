//! Device queries, interface agnostic.
use anyhow::{Context, Result};
use blkinfo::{DeviceReport, StorageDevice};
use linapi::system::devices::block::Block;
use std::path::{Path, PathBuf};
use structopt::clap::arg_enum;

arg_enum! {
    /// Supported output formats
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub enum Format {
        Text,
        Json,
    }
}

/// Device files for every connected block device, sorted by name.
pub fn connected() -> Result<Vec<PathBuf>> {
    let mut disks: Vec<Block> = Block::get_connected().context("Couldn't get connected devices")?;
    disks.sort_unstable_by(|a, b| a.name().cmp(b.name()));
    disks
        .iter()
        .map(|disk| -> Result<PathBuf> {
            Ok(disk
                .dev_path()
                .with_context(|| format!("Couldn't get device file for `{}`", disk.name()))?
                .unwrap_or_else(|| Path::new("/dev").join(disk.name())))
        })
        .collect()
}

/// Gather a report for `path`.
pub fn describe(path: &Path) -> Result<DeviceReport> {
    let dev = StorageDevice::new(path);
    dev.report()
        .with_context(|| format!("Couldn't describe device {}", path.display()))
}

/// Render `reports` in `format`.
pub fn dump(format: Format, reports: &[DeviceReport]) -> Result<String> {
    match format {
        Format::Text => Ok(reports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        Format::Json => Ok(serde_json::to_string_pretty(reports)?),
    }
}

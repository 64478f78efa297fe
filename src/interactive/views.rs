//! TUI interface
use super::components::*;
use crate::actions::connected;
use blkinfo::StorageDevice;
use byte_unit::Byte;
use cursive::{
    traits::Resizable,
    view::{Nameable, View},
    views::{SelectView, TextContent, TextView},
    Cursive,
};
use std::path::{Path, PathBuf};

/// Disks, with the info box text for each.
type DiskSelect = SelectView<String>;

/// Selection label and info box text for the device at `path`.
///
/// A device that can't be described is still listed, with the error as its info.
fn entry(path: &Path) -> (String, String) {
    let dev = StorageDevice::new(path);
    match dev.report() {
        Ok(report) => {
            let model = if report.model.is_empty() {
                "None"
            } else {
                report.model.as_str()
            };
            let label = format!(
                "Disk {} - {} - Model: {}",
                report.device_name, //
                Byte::from_bytes(report.size.into()).get_appropriate_unit(true),
                model,
            );
            let info = report
                .fields()
                .into_iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect::<Vec<_>>()
                .join("\n");
            (label, info)
        }
        Err(e) => (
            format!("Disk {} - Unavailable", dev.device_name()),
            format!("Error: {}", e),
        ),
    }
}

/// Helper to setup views due to cursive oddities
fn setup_views(root: &mut Cursive) {
    // Make sure the selection callback is run so the info box is populated.
    if let Some(cb) = root.call_on_name("disks", |v: &mut DiskSelect| {
        v.set_selection(v.selected_id().unwrap_or(0))
    }) {
        cb(root)
    }
}

fn disks_impl(devices: &[PathBuf]) -> impl View {
    let mut disks_view: DiskSelect = selection();
    for path in devices {
        let (label, info) = entry(path);
        disks_view.add_item(label, info);
    }
    let content = TextContent::new("");
    let shown = content.clone();
    disks_view.set_on_select(move |_root: &mut Cursive, info: &String| {
        shown.set_content(info.as_str());
    });
    info_box_panel(
        "Disks",
        disks_view.with_name("disks").full_screen(),
        vec![TextView::new_with_content(content)],
    )
}

/// Disk Selection Display
///
/// Lists `device`, or every connected device if [`None`].
pub fn disks(root: &mut Cursive, device: Option<PathBuf>) {
    let devices = match device {
        Some(d) => Ok(vec![d]),
        None => connected(),
    };
    match devices {
        Ok(devices) => {
            root.add_fullscreen_layer(disks_impl(&devices));
            setup_views(root);
        }
        Err(e) => root.add_layer(error_quit(e)),
    }
}

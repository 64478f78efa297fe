//! Code for the interactive TUI interface
use anyhow::Result;
use cursive::CursiveExt;
use cursive::{
    event::Key,
    theme::{BaseColor::*, Color::*, PaletteColor::*, Theme},
    Cursive,
};
use std::path::PathBuf;

pub mod components;
pub mod views;

use views::disks;

/// Set a better default theme. Assumes dark terminal. Untested on light.
fn theme(root: &mut Cursive) -> Theme {
    let mut theme = root.current_theme().clone();
    theme.palette[Background] = TerminalDefault;
    theme.palette[View] = TerminalDefault;
    theme.palette[Primary] = Dark(White);
    theme.palette[Tertiary] = Dark(White);
    theme
}

/// Handle the TUI interface.
///
/// With `device`, only that device is listed.
///
/// This function doesn't return until the user exits.
pub fn handle_tui(device: Option<PathBuf>) -> Result<()> {
    let mut root = Cursive::default();
    // Theme
    let theme = theme(&mut root);
    root.set_theme(theme);

    // User entry point
    disks(&mut root, device);

    // Global hotkeys
    root.add_global_callback('q', |s| s.quit());
    root.add_global_callback(Key::Esc, |s| s.quit());

    root.run();
    Ok(())
}

//! CLI Argument handling code
use crate::actions::Format;
use std::path::PathBuf;
use structopt::{
    clap::{AppSettings, Shell},
    StructOpt,
};

/// Describe Linux block storage devices
#[derive(Clone, Debug, StructOpt)]
#[structopt(global_settings(&[
    AppSettings::ColoredHelp,
    AppSettings::DisableHelpSubcommand,
    AppSettings::VersionlessSubcommands,
]))]
pub struct Args {
    /// Device file or kernel name, like `/dev/sda` or `sda`.
    ///
    /// If not specified, describes every connected block device.
    pub device: Option<PathBuf>,

    /// Format to output in
    #[structopt(
        short,
        long,
        case_insensitive(true),
        possible_values(&Format::variants()),
        default_value = "Text"
    )]
    pub format: Format,

    /// Use an interactive TUI interface.
    /// If `device` is not specified, displays a selection.
    #[structopt(short, long)]
    pub interactive: bool,

    #[structopt(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Clone, Debug, StructOpt)]
pub enum Commands {
    /// Generate completions to stdout.
    Complete {
        /// Shell
        #[structopt(possible_values(&Shell::variants()), default_value = "fish")]
        shell: Shell,
    },
}

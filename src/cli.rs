//! Handle CLI stuff
use crate::actions::{connected, describe, dump};
use anyhow::Result;
use std::io;
use structopt::StructOpt;
use tracing::debug;

pub mod args;

use args::{Args, Commands};

/// Print reports for the requested devices, or handle a subcommand.
pub fn handle_cli(args: Args) -> Result<()> {
    if let Some(Commands::Complete { shell }) = args.cmd {
        Args::clap().gen_completions_to(env!("CARGO_PKG_NAME"), shell, &mut io::stdout());
        return Ok(());
    }
    let devices = match args.device {
        Some(device) => vec![device],
        None => connected()?,
    };
    debug!(count = devices.len(), "Describing devices");
    let reports = devices
        .iter()
        .map(|d| describe(d))
        .collect::<Result<Vec<_>>>()?;
    println!("{}", dump(args.format, &reports)?);
    Ok(())
}

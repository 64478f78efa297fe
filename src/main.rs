use anyhow::Result;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

mod actions;
mod cli;
mod interactive;

use cli::args::Args;

/// Log to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args: Args = Args::from_args();
    // Log lines would draw over the TUI.
    if args.interactive {
        return interactive::handle_tui(args.device);
    }
    init_logging();
    cli::handle_cli(args)
}

//! Error types.
use std::{io, path::PathBuf};
use thiserror::Error;

/// Failure running an external program.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The program couldn't be started at all.
    #[error("Couldn't run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The program ran and reported failure.
    #[error("`{command}` failed ({status}): {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Errors from querying a storage device.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// A command succeeded but didn't print what we expected.
    #[error("Unexpected output from `{command}`: {output:?}")]
    Parse { command: String, output: String },

    /// The device lacks a capability the caller required.
    #[error("{0}")]
    Assertion(String),

    /// Reading a sysfs attribute failed for a reason other than it missing.
    #[error("Couldn't read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

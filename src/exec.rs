//! Running external programs.
use crate::error::ExecError;
use std::process::Command;
use tracing::debug;

/// Runs a program and returns its stdout, one entry per line.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<String>, ExecError>;
}

/// Format `program` and `args` the way a shell user would type them.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut s = program.to_owned();
    for arg in args {
        s.push(' ');
        s.push_str(arg);
    }
    s
}

/// [`CommandRunner`] backed by [`std::process::Command`].
///
/// The C locale is forced so output is stable to parse.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<String>, ExecError> {
        let command = command_line(program, args);
        debug!(%command, "Executing");
        let output = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .output()
            .map_err(|source| ExecError::Spawn {
                command: command.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(ExecError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect())
    }
}

//! Interactive mode: guided session for bare `glance` invocation.
//!
//! When `glance` is invoked with no subcommand on a TTY, the user uploads an
//! image, picks or writes a question and gets the answer, then chooses to ask
//! again, switch images or leave.

pub mod session;
pub mod theme;

use glance_core::Config;
use std::process::ExitCode;

use super::startup::open_session;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Entry point for interactive mode.
///
/// The credential is resolved before anything is shown; without it the
/// session never starts.
pub async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let glance = open_session(config)?;
    theme::print_banner(glance.model_name());

    session::Session::new(&glance).run().await?;

    let dim = console::Style::new().for_stderr().dim();
    eprintln!("  {}", dim.apply_to("Goodbye!"));
    Ok(ExitCode::SUCCESS)
}

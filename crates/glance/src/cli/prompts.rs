//! The `glance prompts` command.

use glance_core::PromptCatalog;
use std::process::ExitCode;

/// Print the suggested questions with the numbers `ask --prompt` accepts.
pub fn execute() -> anyhow::Result<ExitCode> {
    for (i, prompt) in PromptCatalog::default().entries().iter().enumerate() {
        println!("{:>2}. {prompt}", i + 1);
    }
    Ok(ExitCode::SUCCESS)
}

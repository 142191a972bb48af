//! The `glance ask` command: one question, one image, one answer.

use clap::Args;
use glance_core::{Config, GlanceError, PromptSelection};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use super::render::{self, OutputFormat};
use super::startup::open_session;

/// Arguments for the `ask` command.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// JPG, JPEG or PNG image to ask about
    pub image: Option<PathBuf>,

    /// Start from suggested question N (see `glance prompts`)
    #[arg(short, long, value_name = "N")]
    pub prompt: Option<usize>,

    /// Question text (replaces the suggested question if both are given)
    #[arg(short, long)]
    pub question: Option<String>,

    /// Output format for the answer
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl AskArgs {
    /// Which catalog entry (if any) seeds the question field.
    fn selection(&self, catalog_len: usize) -> anyhow::Result<PromptSelection> {
        match self.prompt {
            None => Ok(PromptSelection::Custom),
            Some(n) if (1..=catalog_len).contains(&n) => Ok(PromptSelection::Catalog(n - 1)),
            Some(n) => anyhow::bail!(
                "No suggested question #{n} (choose 1-{catalog_len}, see `glance prompts`)"
            ),
        }
    }
}

/// Execute the ask command.
pub async fn execute(config: &Config, args: AskArgs) -> anyhow::Result<ExitCode> {
    let glance = open_session(config)?;
    let selection = args.selection(glance.prompts().catalog().len())?;

    let image = match &args.image {
        Some(path) => match glance.ingest_path(path) {
            Ok(image) => {
                render::image_accepted(&image);
                Some(image)
            }
            Err(GlanceError::Decode(e)) => {
                render::decode_failure(&e);
                return Ok(ExitCode::FAILURE);
            }
            Err(e) => anyhow::bail!("Cannot read {}: {e}", path.display()),
        },
        None => None,
    };

    // The field starts from the suggestion; --question replaces it.
    let field = args
        .question
        .clone()
        .unwrap_or_else(|| glance.prompts().initial_text(selection).to_string());

    // A blank question goes through as empty so the orchestrator can report
    // a missing image first.
    let question = glance
        .prompts()
        .resolve(selection, &field)
        .unwrap_or_default();

    let outcome = with_spinner(glance.submit(image.as_ref(), &question)).await;

    match outcome {
        Ok(result) => {
            render::analysis(&result, args.format)?;
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(failure) => {
            render::rejection(failure);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Run `fut` while a spinner is shown on stderr.
pub(crate) async fn with_spinner<F: std::future::Future>(fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("AI is analyzing your image...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    spinner.finish_and_clear();
    output
}

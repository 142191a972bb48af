//! Rendering of pipeline outcomes.
//!
//! Status banners go to stderr; the answer itself (or its JSON form) goes to
//! stdout so it can be piped.

use clap::ValueEnum;
use console::Style;
use glance_core::{AnalysisResult, DecodeError, UploadedImage, ValidationFailure};
use std::io::IsTerminal;
use termimad::crossterm::style::Color;
use termimad::MadSkin;

/// How answers are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown-rendered answer (plain text when piped)
    #[default]
    Text,
    /// The `AnalysisResult` as a JSON object
    Json,
}

/// Two-line banner: bold headline plus detail.
#[derive(Debug, PartialEq, Eq)]
pub struct Banner {
    pub headline: String,
    pub detail: String,
}

impl Banner {
    fn error(headline: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            headline: format!("✗ {}", headline.into()),
            detail: detail.into(),
        }
    }

    fn print_error(&self) {
        let red = Style::new().for_stderr().red();
        eprintln!("  {}", red.clone().bold().apply_to(&self.headline));
        eprintln!("  {}", red.apply_to(&self.detail));
    }
}

pub fn rejection_banner(failure: ValidationFailure) -> Banner {
    Banner::error(failure.to_string(), failure.hint())
}

pub fn decode_banner(err: &DecodeError) -> Banner {
    Banner::error(
        "Could not read that image",
        format!("{err}. Please upload a JPG, JPEG or PNG file."),
    )
}

/// Banner for a failed remote call; `None` for a success.
pub fn failure_banner(result: &AnalysisResult) -> Option<Banner> {
    match result {
        AnalysisResult::Success { .. } => None,
        AnalysisResult::Failure { message, .. } => {
            Some(Banner::error("Error occurred!", message.clone()))
        }
    }
}

/// Confirmation shown after a successful upload.
pub fn image_accepted(image: &UploadedImage) {
    let green = Style::new().for_stderr().green();
    let dim = Style::new().for_stderr().dim();
    eprintln!("  {}", green.apply_to("✓ Image uploaded successfully!"));
    eprintln!("  {}", dim.apply_to(format!("Details: {}", image.summary())));
}

pub fn rejection(failure: ValidationFailure) {
    rejection_banner(failure).print_error();
}

pub fn decode_failure(err: &DecodeError) {
    decode_banner(err).print_error();
}

/// Render a completed analysis.
pub fn analysis(result: &AnalysisResult, format: OutputFormat) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    match result {
        AnalysisResult::Success { text } => {
            let green = Style::new().for_stderr().green().bold();
            eprintln!();
            eprintln!("  {}", green.apply_to("✓ Analysis Complete!"));
            eprintln!("  Here's what the AI found:");
            eprintln!();
            if std::io::stdout().is_terminal() {
                markdown_skin().print_text(text);
            } else {
                println!("{text}");
            }
        }
        AnalysisResult::Failure { .. } => {
            if let Some(banner) = failure_banner(result) {
                banner.print_error();
            }
        }
    }
    Ok(())
}

fn markdown_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.headers[0].set_fg(Color::Cyan);
    skin.headers[1].set_fg(Color::Blue);
    skin.bold.set_fg(Color::White);
    skin.italic.set_fg(Color::Magenta);
    skin.inline_code.set_fg(Color::Yellow);
    skin
}

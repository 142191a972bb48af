//! The upload → question → answer loop.

use console::Style;
use dialoguer::{Input, Select};
use glance_core::{Glance, GlanceError, PromptSelection, UploadedImage, ValidationFailure};
use std::path::PathBuf;

use super::handle_interrupt;
use super::theme::glance_theme;
use crate::cli::ask::with_spinner;
use crate::cli::render::{self, OutputFormat};

/// What to do after an answer has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    AskAgain,
    NewImage,
    Exit,
}

const NEXT_ITEMS: &[&str] = &[
    "Ask another question about this image",
    "Upload a new image",
    "Exit",
];

impl NextStep {
    fn from_menu(position: Option<usize>) -> Self {
        match position {
            Some(0) => Self::AskAgain,
            Some(1) => Self::NewImage,
            _ => Self::Exit,
        }
    }
}

/// One interactive session. Holds the current image between questions.
pub struct Session<'a> {
    glance: &'a Glance,
    image: Option<UploadedImage>,
}

impl<'a> Session<'a> {
    pub fn new(glance: &'a Glance) -> Self {
        Self {
            glance,
            image: None,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            if self.image.is_none() && !self.upload()? {
                return Ok(());
            }

            let Some(question) = self.question()? else {
                return Ok(());
            };

            let outcome = with_spinner(self.glance.submit(self.image.as_ref(), &question)).await;
            match outcome {
                Ok(result) => render::analysis(&result, OutputFormat::Text)?,
                Err(failure) => {
                    render::rejection(failure);
                    if failure == ValidationFailure::ImageMissing {
                        self.image = None;
                    }
                    continue;
                }
            }

            eprintln!();
            let choice = Select::with_theme(&glance_theme())
                .with_prompt("What next?")
                .items(NEXT_ITEMS)
                .default(0)
                .interact_opt()?;

            match NextStep::from_menu(choice) {
                NextStep::AskAgain => {}
                NextStep::NewImage => self.image = None,
                NextStep::Exit => return Ok(()),
            }
        }
    }

    /// Prompt for an image path until one decodes. An empty answer continues
    /// without an image. Returns `false` on interrupt.
    fn upload(&mut self) -> anyhow::Result<bool> {
        let theme = glance_theme();
        let warn = Style::new().for_stderr().yellow();

        loop {
            let Some(raw_path) = handle_interrupt(
                Input::<String>::with_theme(&theme)
                    .with_prompt("Image to analyze (JPG, JPEG or PNG)")
                    .allow_empty(true)
                    .interact_text(),
            )?
            else {
                return Ok(false);
            };

            let raw_path = raw_path.trim();
            if raw_path.is_empty() {
                return Ok(true);
            }

            let path = PathBuf::from(shellexpand::tilde(raw_path).into_owned());
            match self.glance.ingest_path(&path) {
                Ok(image) => {
                    render::image_accepted(&image);
                    tracing::debug!("Current image: {}", image.summary());
                    self.image = Some(image);
                    return Ok(true);
                }
                Err(GlanceError::Decode(e)) => render::decode_failure(&e),
                Err(e) => eprintln!(
                    "  {}",
                    warn.apply_to(format!("Cannot read {}: {e}", path.display()))
                ),
            }
        }
    }

    /// Pick a suggested question (or a blank one) and let the user edit it.
    fn question(&self) -> anyhow::Result<Option<String>> {
        let theme = glance_theme();
        let prompts = self.glance.prompts();
        let catalog = prompts.catalog();

        let Some(position) = Select::with_theme(&theme)
            .with_prompt("Choose a question")
            .items(&catalog.menu_items())
            .default(0)
            .interact_opt()?
        else {
            return Ok(None);
        };

        let selection = catalog
            .selection_for_menu(position)
            .unwrap_or(PromptSelection::Custom);

        let field = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Your question")
                .with_initial_text(prompts.initial_text(selection))
                .allow_empty(true)
                .interact_text(),
        )?;

        // Blank resolves to "" and is rejected at submission.
        Ok(field.map(|text| prompts.resolve(selection, &text).unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_from_menu() {
        assert_eq!(NextStep::from_menu(Some(0)), NextStep::AskAgain);
        assert_eq!(NextStep::from_menu(Some(1)), NextStep::NewImage);
        assert_eq!(NextStep::from_menu(Some(2)), NextStep::Exit);
        assert_eq!(NextStep::from_menu(None), NextStep::Exit);
    }

    #[test]
    fn test_menu_covers_every_step() {
        assert_eq!(NEXT_ITEMS.len(), 3);
    }
}

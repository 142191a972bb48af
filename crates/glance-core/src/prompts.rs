//! Example questions and question text resolution.

use crate::error::EmptyPromptError;

/// Label shown for the free-form choice.
pub const CUSTOM_LABEL: &str = "Custom question...";

/// Read-only, ordered list of suggested questions.
#[derive(Debug, Clone, Copy)]
pub struct PromptCatalog {
    entries: &'static [&'static str],
}

const DEFAULT_PROMPTS: &[&str] = &[
    "What's in this image?",
    "Describe the main objects",
    "What colors are dominant?",
    "Is there text in this image?",
    "What's the mood of this picture?",
];

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PROMPTS,
        }
    }
}

impl PromptCatalog {
    pub fn entries(&self) -> &'static [&'static str] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selection for the catalog entry at `index`, if it exists.
    pub fn selection(&self, index: usize) -> Option<PromptSelection> {
        (index < self.entries.len()).then_some(PromptSelection::Catalog(index))
    }

    /// Menu labels: the custom choice first, then every entry.
    pub fn menu_items(&self) -> Vec<&'static str> {
        std::iter::once(CUSTOM_LABEL)
            .chain(self.entries.iter().copied())
            .collect()
    }

    /// Map a menu position from [`Self::menu_items`] back to a selection.
    pub fn selection_for_menu(&self, position: usize) -> Option<PromptSelection> {
        match position {
            0 => Some(PromptSelection::Custom),
            n => self.selection(n - 1),
        }
    }
}

/// Where the editable question field starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptSelection {
    /// Start from the catalog entry at this index
    Catalog(usize),
    /// Start from an empty field
    Custom,
}

/// Turns a selection and the edited field into the question to send.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptSelector {
    catalog: PromptCatalog,
}

impl PromptSelector {
    pub fn new(catalog: PromptCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    /// Initial contents of the editable field for `selection`.
    ///
    /// The catalog only suggests; the user may edit before submitting.
    pub fn initial_text(&self, selection: PromptSelection) -> &'static str {
        match selection {
            PromptSelection::Catalog(i) => self.catalog.entries.get(i).copied().unwrap_or(""),
            PromptSelection::Custom => "",
        }
    }

    /// The question actually submitted: the field's text, trimmed.
    ///
    /// `selection` only determined the field's starting value, so it plays no
    /// part here beyond being logged.
    pub fn resolve(
        &self,
        selection: PromptSelection,
        field_text: &str,
    ) -> Result<String, EmptyPromptError> {
        let question = field_text.trim();
        if question.is_empty() {
            return Err(EmptyPromptError);
        }
        if question != self.initial_text(selection) {
            tracing::debug!("Question edited from {selection:?} starting value");
        }
        Ok(question.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let catalog = PromptCatalog::default();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.entries()[0], "What's in this image?");
        assert_eq!(catalog.entries()[4], "What's the mood of this picture?");
    }

    #[test]
    fn test_menu_items_lead_with_custom() {
        let catalog = PromptCatalog::default();
        let items = catalog.menu_items();
        assert_eq!(items[0], CUSTOM_LABEL);
        assert_eq!(items.len(), catalog.len() + 1);
        assert_eq!(catalog.selection_for_menu(0), Some(PromptSelection::Custom));
        assert_eq!(
            catalog.selection_for_menu(2),
            Some(PromptSelection::Catalog(1))
        );
        assert_eq!(catalog.selection_for_menu(6), None);
    }

    #[test]
    fn test_selection_out_of_range() {
        assert_eq!(PromptCatalog::default().selection(5), None);
    }

    #[test]
    fn test_initial_text() {
        let selector = PromptSelector::default();
        assert_eq!(
            selector.initial_text(PromptSelection::Catalog(2)),
            "What colors are dominant?"
        );
        assert_eq!(selector.initial_text(PromptSelection::Custom), "");
    }

    #[test]
    fn test_resolve_uses_edited_text() {
        let selector = PromptSelector::default();
        let question = selector
            .resolve(PromptSelection::Catalog(0), "  What's in this image? Be brief. ")
            .unwrap();
        assert_eq!(question, "What's in this image? Be brief.");
    }

    #[test]
    fn test_resolve_custom() {
        let selector = PromptSelector::default();
        let question = selector
            .resolve(PromptSelection::Custom, "How many dogs?")
            .unwrap();
        assert_eq!(question, "How many dogs?");
    }

    #[test]
    fn test_resolve_rejects_blank() {
        let selector = PromptSelector::default();
        for blank in ["", "   ", "\t\n"] {
            assert_eq!(
                selector.resolve(PromptSelection::Catalog(0), blank),
                Err(EmptyPromptError)
            );
        }
    }
}

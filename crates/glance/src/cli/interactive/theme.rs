//! Dialoguer theme and entry banner for interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// `ColorfulTheme` with cyan prompts and green confirmations.
pub fn glance_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().cyan(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().cyan(),
        active_item_style: Style::new().for_stderr().cyan(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

fn banner_lines(model: &str) -> [String; 4] {
    let title = format!("Glance v{}", glance_core::VERSION);
    let tagline = "Ask questions about your images";
    let model_line = format!("model: {model}");

    let inner_width = tagline
        .chars()
        .count()
        .max(model_line.chars().count())
        + 4;

    [
        format!("  ╭{:─<width$}╮", "", width = inner_width),
        format!("  │{:^width$}│", title, width = inner_width),
        format!("  │{:^width$}│", tagline, width = inner_width),
        format!("  │{:^width$}│", model_line, width = inner_width),
    ]
}

/// Prints the entry banner to stderr.
pub fn print_banner(model: &str) {
    let cyan = Style::new().for_stderr().cyan();
    let lines = banner_lines(model);
    let width = lines[1].chars().count() - 4;

    eprintln!();
    for line in &lines {
        eprintln!("{}", cyan.apply_to(line));
    }
    eprintln!(
        "{}",
        cyan.apply_to(format!("  ╰{:─<width$}╯", "", width = width))
    );
    eprintln!();
}

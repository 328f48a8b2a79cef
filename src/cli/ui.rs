use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::core::format::{
    IN_FLIGHT_MESSAGE, INVALID_AMOUNT_MESSAGE, TOO_LARGE_MESSAGE, UNRESOLVED_MESSAGE,
};
use crate::core::{DisplayMessage, DisplaySurface};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Result,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Result => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Picks the style for a message produced by the conversion core.
pub fn style_message(message: &DisplayMessage) -> String {
    let style_type = match message.as_str() {
        UNRESOLVED_MESSAGE | INVALID_AMOUNT_MESSAGE | TOO_LARGE_MESSAGE => StyleType::Error,
        IN_FLIGHT_MESSAGE => StyleType::Subtle,
        _ => StyleType::Result,
    };
    style_text(message.as_str(), style_type)
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] {pos}/{len}"
    } else {
        "{spinner:.green} [{elapsed_precise}] {pos}/{len}"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Writes session messages to stdout.
pub struct TerminalSurface;

impl DisplaySurface for TerminalSurface {
    fn show(&self, message: &DisplayMessage) {
        println!("{}", style_message(message));
    }
}

use super::ui;
use crate::core::currency::CURRENCY_COUNTRIES;
use comfy_table::Cell;

/// Renders the known currency codes with the country each one is listed under.
pub fn render_table() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Country")]);
    for (code, country) in CURRENCY_COUNTRIES {
        table.add_row(vec![Cell::new(code), Cell::new(country)]);
    }
    table.to_string()
}

pub fn run() {
    println!(
        "{}\n\n{}",
        ui::style_text("Supported currencies", ui::StyleType::Title),
        render_table()
    );
}

//! Table rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Render rows under `headers`. Columns whose header is "Amount" are right
/// aligned.
pub fn render_table(headers: &[&str], rows: Vec<Vec<String>>, unicode: bool) -> String {
    let mut table = Table::new();
    if unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());

    for row in rows {
        let cells: Vec<Cell> = row
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let cell = Cell::new(value);
                if headers.get(i) == Some(&"Amount") {
                    cell.set_alignment(CellAlignment::Right)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(cells);
    }
    table.to_string()
}

/// Format `amount` with two decimals and an optional currency symbol.
pub fn format_amount(amount: Decimal, currency: Option<&str>) -> String {
    let value = format!("{:.2}", amount);
    match currency {
        Some(symbol) => format!("{} {}", value, symbol),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(1000, 0), None), "1000.00");
        assert_eq!(format_amount(Decimal::new(35, 1), Some("EUR")), "3.50 EUR");
    }

    #[test]
    fn test_ascii_table_contains_cells() {
        let rendered = render_table(
            &["ID", "Name", "Amount"],
            vec![vec!["1".into(), "Rent".into(), "1000.00".into()]],
            false,
        );
        assert!(rendered.contains("Rent"));
        assert!(rendered.contains("1000.00"));
        assert!(rendered.lines().count() >= 3);
    }
}

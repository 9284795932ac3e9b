//! `cstore search`: substring search over product names.

use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use console::style;

use cstore_types::product::Product;

use crate::state::AppState;

pub async fn search(
    state: &AppState,
    query: &str,
    brand: Option<&str>,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = state.catalog().get().await?;
    let matches = catalog.search(query.trim(), brand);
    let total = matches.len();
    let shown: Vec<&Product> = matches.into_iter().take(limit).collect();

    if json {
        let body = serde_json::json!({ "total": total, "products": shown });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!();
        println!("  No promotions match '{}'.", style(query).cyan());
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Brand").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Price").fg(Color::White),
        Cell::new("Event").fg(Color::White),
        Cell::new("Category").fg(Color::White),
    ]);

    for product in &shown {
        table.add_row(vec![
            Cell::new(&product.brand).fg(Color::Cyan),
            Cell::new(&product.name),
            Cell::new(format!("{}원", product.price)).set_alignment(CellAlignment::Right),
            Cell::new(&product.event).fg(Color::Green),
            Cell::new(&product.category).fg(Color::DarkGrey),
        ]);
    }

    println!("{table}");
    if total > shown.len() {
        println!(
            "  {}",
            style(format!("{} of {total} matches shown (use --limit)", shown.len())).dim()
        );
    }
    Ok(())
}

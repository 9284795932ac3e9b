//! `cstore summary`: catalog statistics per brand.

use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use console::style;

use cstore_core::dashboard::group_thousands;
use cstore_types::product::{BrandStat, EventCount};

use crate::state::AppState;

/// Event labels shown per brand before the rest are elided.
const TOP_EVENTS: usize = 3;

pub async fn summary(state: &AppState, json: bool) -> anyhow::Result<()> {
    let catalog = match state.catalog().get().await {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::debug!(error = %e, "catalog unavailable");
            if json {
                let body = serde_json::json!({ "available": false, "reason": e.to_string() });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!();
                println!("  {} 데이터를 불러올 수 없습니다.", style("⚠").yellow());
                println!("  {}", style(e).dim());
                println!();
            }
            return Ok(());
        }
    };

    let summary = catalog.summary();
    let brands = catalog.brand_stats();

    if json {
        let body = serde_json::json!({
            "available": true,
            "total_count": summary.total_count,
            "brands_count": summary.brands_count,
            "brands": brands,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!();
    println!("  {}", style("── 📊 실시간 현황 ──").dim());
    println!(
        "  ✅ 총 행사 상품: {}개",
        style(group_thousands(summary.total_count)).bold()
    );
    println!(
        "  🏪 참여 브랜드: {}개",
        style(summary.brands_count).bold()
    );
    println!();

    if brands.is_empty() {
        return Ok(());
    }

    println!("{}", brand_table(&brands));
    println!();
    Ok(())
}

fn brand_table(brands: &[BrandStat]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Brand").fg(Color::White),
        Cell::new("Listings").fg(Color::White),
        Cell::new("Top events").fg(Color::White),
    ]);

    for stat in brands {
        table.add_row(vec![
            Cell::new(&stat.brand).fg(Color::Cyan),
            Cell::new(group_thousands(stat.product_count)).set_alignment(CellAlignment::Right),
            Cell::new(format_events(&stat.events)).fg(Color::DarkGrey),
        ]);
    }
    table
}

/// "1+1 (12), 2+1 (5) …" with at most [`TOP_EVENTS`] labels.
fn format_events(events: &[EventCount]) -> String {
    let mut shown: Vec<String> = events
        .iter()
        .take(TOP_EVENTS)
        .map(|e| format!("{} ({})", e.event, e.count))
        .collect();
    if events.len() > TOP_EVENTS {
        shown.push("…".to_string());
    }
    shown.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(event: &str, count: usize) -> EventCount {
        EventCount {
            event: event.to_string(),
            count,
        }
    }

    #[test]
    fn test_format_events_truncates() {
        let events = vec![count("1+1", 12), count("2+1", 5), count("덤", 2), count("할인", 1)];
        assert_eq!(format_events(&events), "1+1 (12), 2+1 (5), 덤 (2), …");
    }

    #[test]
    fn test_format_events_empty() {
        assert_eq!(format_events(&[]), "");
    }
}

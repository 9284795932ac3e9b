//! Welcome banner display for chat sessions.

use console::style;

use cstore_core::dashboard::{CredentialStatus, DashboardView, group_thousands};

/// Print the banner at the start of a chat session from the dashboard view.
pub fn print_welcome_banner(view: &DashboardView, model: &str) {
    println!();
    println!("  {}", style(view.hero.title).cyan().bold());
    println!("  {}", style(view.hero.subtitle).dim());
    println!();

    let stats = &view.sidebar.stats;
    if stats.available {
        println!(
            "  {}  {}개 · {}개 브랜드",
            style("행사 상품:").bold(),
            group_thousands(stats.total_count),
            stats.brands_count
        );
    } else {
        println!(
            "  {}  {}",
            style("행사 상품:").bold(),
            style("데이터를 불러올 수 없습니다").yellow()
        );
    }
    println!("  {}  {}", style("Model:").bold(), style(model).dim());

    let notice = match view.sidebar.credential {
        CredentialStatus::Configured => style(view.sidebar.credential_notice).green(),
        CredentialStatus::Missing => style(view.sidebar.credential_notice).yellow(),
    };
    println!("  {notice}");
    println!();

    println!("  {}", style(view.chat.title).bold());
    println!("  {}", style(view.chat.hint).dim());
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::auth::{GuardDecision, Role, Session};
use crate::ui::menu_for;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a guard decision as a colored string
pub fn format_decision(decision: &GuardDecision) -> String {
    match decision {
        GuardDecision::Proceed => "proceed".green().to_string(),
        GuardDecision::Redirect(target) => format!("redirect → {}", target).yellow().to_string(),
    }
}

/// One evaluated guard check, as printed by `schoolgate check`
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub path: &'a str,
    pub session: &'a Session,
    pub guarded: bool,
    pub decision: GuardDecision,
}

/// Print a guard check as a table
pub fn print_check_table(report: &CheckReport<'_>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Path").fg(Color::Cyan),
            Cell::new("Token").fg(Color::Cyan),
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Guarded").fg(Color::Cyan),
            Cell::new("Decision").fg(Color::Cyan),
        ]);

    let decision_color = if report.decision.is_redirect() {
        Color::Yellow
    } else {
        Color::Green
    };

    table.add_row(vec![
        Cell::new(report.path),
        Cell::new(if report.session.has_access_token { "present" } else { "absent" }),
        Cell::new(report.session.role.as_deref().unwrap_or("-")),
        Cell::new(if report.guarded { "yes" } else { "no" }),
        Cell::new(report.decision.to_string()).fg(decision_color),
    ]);

    println!("{table}");
}

/// Print every role area with its home and menu
pub fn print_routes_table() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Role").fg(Color::Cyan),
            Cell::new("Area").fg(Color::Cyan),
            Cell::new("Menu").fg(Color::Cyan),
        ]);

    for role in Role::ALL {
        let menu: Vec<String> = menu_for(role)
            .iter()
            .map(|item| format!("{} ({})", item.name, item.href))
            .collect();
        table.add_row(vec![
            Cell::new(role.as_str()).fg(Color::Green),
            Cell::new(format!("{}/*", role.area_prefix())),
            Cell::new(menu.join("\n")),
        ]);
    }

    println!("{table}");
    info("Auth pages: /login, /register (logged-out visitors only)");
}

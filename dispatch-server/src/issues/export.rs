//! CSV export for the admin dashboard
//!
//! Fixed column set, one row per issue in snapshot order. Titles have
//! commas stripped rather than quoted, matching what the dashboard's
//! download button has always produced.

use shared::models::Issue;
use shared::util::format_date;

pub const CSV_HEADER: &str = "ID,Title,Category,Status,City,Contractor,Date";

/// Render a snapshot as CSV, header first.
pub fn issues_to_csv(issues: &[Issue]) -> String {
    let mut out = String::with_capacity(64 + issues.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for issue in issues {
        out.push_str(&csv_row(issue));
        out.push('\n');
    }
    out
}

fn csv_row(issue: &Issue) -> String {
    let title = issue.title.replace(',', " ");
    let category = if issue.ai_analysis.category.trim().is_empty() {
        "General"
    } else {
        issue.ai_analysis.category.as_str()
    };
    let contractor = issue.contractor_name.as_deref().unwrap_or("Unassigned");
    format!(
        "{},{},{},{},{},{},{}",
        issue.id,
        title,
        category,
        issue.status,
        issue.location.city,
        contractor,
        format_date(issue.created_at),
    )
}

//! Contractor job matching and dashboard aggregation
//!
//! Pure functions over an issue snapshot; the service layer feeds them the
//! latest view from the store. Matching is deterministic: a job is offered
//! to a contractor iff it is Accepted, sits in their operating city, and
//! falls under their trade (by dispatched trade, by advisory category
//! alias, or unconditionally for All Rounder).

use shared::models::{ContractorProfile, Issue, IssueStatus, Trade};
use shared::response::{AdminStatsResponse, DepartmentStats};

use super::transitions::trade_matches;

/// The three job lists a contractor sees
#[derive(Debug, Default)]
pub struct ContractorViews {
    /// Accepted jobs in their city and trade, open to claim
    pub available: Vec<Issue>,
    /// In Progress jobs they have claimed
    pub active: Vec<Issue>,
    /// Resolved jobs they completed
    pub history: Vec<Issue>,
}

/// Whether an issue is offered to this contractor right now.
pub fn is_available_to(issue: &Issue, contractor: &ContractorProfile) -> bool {
    issue.status == IssueStatus::Accepted
        && issue
            .location
            .city
            .eq_ignore_ascii_case(contractor.operating_city.trim())
        && trade_matches(issue, contractor.trade)
}

fn is_mine(issue: &Issue, contractor: &ContractorProfile) -> bool {
    issue.contractor_name.as_deref() == Some(contractor.display_name.as_str())
}

/// Split a snapshot into the contractor's available/active/history lists.
/// Input order (newest first) is preserved in every list.
pub fn contractor_views(snapshot: &[Issue], contractor: &ContractorProfile) -> ContractorViews {
    let mut views = ContractorViews::default();
    for issue in snapshot {
        if is_available_to(issue, contractor) {
            views.available.push(issue.clone());
        } else if issue.status == IssueStatus::InProgress && is_mine(issue, contractor) {
            views.active.push(issue.clone());
        } else if issue.status == IssueStatus::Resolved && is_mine(issue, contractor) {
            views.history.push(issue.clone());
        }
    }
    views
}

/// Sum of job budgets across completed work. Jobs without a price
/// contribute nothing.
pub fn total_earnings(history: &[Issue]) -> f64 {
    history.iter().filter_map(|issue| issue.price).sum()
}

/// A citizen's own reports, matched by uid or email.
pub fn my_reports(snapshot: &[Issue], uid: &str, email: &str) -> Vec<Issue> {
    snapshot
        .iter()
        .filter(|issue| issue.user_id == uid || issue.user_email == email)
        .cloned()
        .collect()
}

/// City-wide totals plus a per-trade breakdown for the admin dashboard.
pub fn admin_stats(snapshot: &[Issue]) -> AdminStatsResponse {
    let total = snapshot.len();
    let resolved = snapshot
        .iter()
        .filter(|i| i.status == IssueStatus::Resolved)
        .count();

    let departments = Trade::ALL
        .iter()
        .filter(|t| **t != Trade::AllRounder)
        .map(|&trade| {
            let jobs: Vec<&Issue> = snapshot
                .iter()
                .filter(|i| i.assigned_to == Some(trade))
                .collect();
            DepartmentStats {
                trade,
                total: jobs.len(),
                resolved: jobs
                    .iter()
                    .filter(|i| i.status == IssueStatus::Resolved)
                    .count(),
                earnings: jobs
                    .iter()
                    .filter(|i| i.status == IssueStatus::Resolved)
                    .filter_map(|i| i.price)
                    .sum(),
            }
        })
        .collect();

    AdminStatsResponse {
        total,
        pending: total - resolved,
        resolved,
        departments,
    }
}

//! Issue state machine
//!
//! States: `Open → Accepted → In Progress → Resolved`, with an admin-only
//! `Resolved → Open` re-open and admin-only deletion from any state.
//!
//! Each transition is a checked constructor: it validates the current
//! document, the acting party, and the accompanying fields, and returns the
//! field-merge patch to persist. Validation failures are returned before
//! any store call happens; patches never clear fields they do not set, so
//! a re-opened issue keeps its contractor stamp and price.

use shared::models::{ContractorProfile, Issue, IssuePatch, IssueStatus, Trade};

/// Why a transition was refused
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransitionError {
    #[error("cannot {action} an issue that is {from}")]
    InvalidTransition {
        from: IssueStatus,
        action: &'static str,
    },

    #[error("a price must be assigned before dispatch")]
    MissingPrice,

    #[error("price must be a positive amount")]
    InvalidPrice,

    #[error("issue is outside the contractor's operating city")]
    CityMismatch,

    #[error("issue is assigned to {assigned}, outside the {trade} trade")]
    TradeMismatch { assigned: String, trade: Trade },

    #[error("only the claiming contractor can resolve this job")]
    NotClaimant,

    #[error("only the reporting citizen can review this issue")]
    NotReporter,

    #[error("a rating between 1 and 5 is required")]
    MissingRating,

    #[error("rating {0} is out of range (1-5)")]
    RatingOutOfRange(u8),

    #[error("this issue has already been reviewed")]
    AlreadyReviewed,
}

impl From<TransitionError> for crate::utils::AppError {
    fn from(e: TransitionError) -> Self {
        use crate::utils::AppError;
        match e {
            TransitionError::InvalidTransition { .. } => AppError::business_rule(e.to_string()),
            TransitionError::AlreadyReviewed => AppError::conflict(e.to_string()),
            TransitionError::CityMismatch
            | TransitionError::TradeMismatch { .. }
            | TransitionError::NotClaimant
            | TransitionError::NotReporter => AppError::forbidden(e.to_string()),
            TransitionError::MissingPrice
            | TransitionError::InvalidPrice
            | TransitionError::MissingRating
            | TransitionError::RatingOutOfRange(_) => AppError::validation(e.to_string()),
        }
    }
}

/// Who is driving a resolve transition
#[derive(Debug, Clone)]
pub enum ResolveActor {
    /// Admin force-resolve, always allowed on an In Progress issue
    Admin,
    /// The contractor must be the one stamped on the record
    Contractor { display_name: String },
}

/// Admin dispatch: `Open → Accepted`, stamping trade and budget.
pub fn dispatch(
    issue: &Issue,
    trade: Trade,
    price: Option<f64>,
) -> Result<IssuePatch, TransitionError> {
    if issue.status != IssueStatus::Open {
        return Err(TransitionError::InvalidTransition {
            from: issue.status,
            action: "dispatch",
        });
    }
    let price = price.ok_or(TransitionError::MissingPrice)?;
    if !price.is_finite() || price <= 0.0 {
        return Err(TransitionError::InvalidPrice);
    }

    Ok(IssuePatch {
        status: Some(IssueStatus::Accepted),
        assigned_to: Some(trade),
        price: Some(price),
        ..Default::default()
    })
}

/// Contractor claim: `Accepted → In Progress`, stamping the claimant.
///
/// The returned patch must be written with a conditional update
/// (`update_if_status(Accepted)`) so the second of two racing contractors
/// fails instead of silently overwriting the first.
pub fn claim(issue: &Issue, contractor: &ContractorProfile) -> Result<IssuePatch, TransitionError> {
    if issue.status != IssueStatus::Accepted {
        return Err(TransitionError::InvalidTransition {
            from: issue.status,
            action: "claim",
        });
    }
    if !issue
        .location
        .city
        .eq_ignore_ascii_case(contractor.operating_city.trim())
    {
        return Err(TransitionError::CityMismatch);
    }
    if !trade_matches(issue, contractor.trade) {
        return Err(TransitionError::TradeMismatch {
            assigned: issue
                .assigned_to
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| issue.ai_analysis.category.clone()),
            trade: contractor.trade,
        });
    }

    Ok(IssuePatch {
        status: Some(IssueStatus::InProgress),
        contractor_name: Some(contractor.display_name.clone()),
        contractor_rating: Some(contractor.rating),
        // The record carries the claimant's trade as its contractor id
        contractor_id: Some(contractor.trade.as_str().to_string()),
        ..Default::default()
    })
}

/// Whether the dispatched trade (or the advisory category) falls under the
/// contractor's trade. All Rounder matches everything.
pub fn trade_matches(issue: &Issue, trade: Trade) -> bool {
    if trade == Trade::AllRounder {
        return true;
    }
    if issue.assigned_to == Some(trade) {
        return true;
    }
    trade.covers_category(&issue.ai_analysis.category)
}

/// `In Progress → Resolved` by the claiming contractor, or force-resolve
/// by an admin.
pub fn resolve(issue: &Issue, actor: &ResolveActor) -> Result<IssuePatch, TransitionError> {
    if issue.status != IssueStatus::InProgress {
        return Err(TransitionError::InvalidTransition {
            from: issue.status,
            action: "resolve",
        });
    }
    if let ResolveActor::Contractor { display_name } = actor
        && issue.contractor_name.as_deref() != Some(display_name.as_str())
    {
        return Err(TransitionError::NotClaimant);
    }

    Ok(IssuePatch {
        status: Some(IssueStatus::Resolved),
        ..Default::default()
    })
}

/// Admin re-open: `Resolved → Open`. The contractor stamp and price are
/// deliberately preserved for audit history.
pub fn reopen(issue: &Issue) -> Result<IssuePatch, TransitionError> {
    if issue.status != IssueStatus::Resolved {
        return Err(TransitionError::InvalidTransition {
            from: issue.status,
            action: "re-open",
        });
    }

    Ok(IssuePatch {
        status: Some(IssueStatus::Open),
        ..Default::default()
    })
}

/// Citizen review on a Resolved issue; at most once, reporter only.
/// Reporter identity matches on uid OR email (both should denote the same
/// citizen, but historical records may carry either).
pub fn review(
    issue: &Issue,
    reporter_uid: &str,
    reporter_email: &str,
    rating: Option<u8>,
    review_text: &str,
) -> Result<IssuePatch, TransitionError> {
    if issue.status != IssueStatus::Resolved {
        return Err(TransitionError::InvalidTransition {
            from: issue.status,
            action: "review",
        });
    }
    if issue.user_id != reporter_uid && issue.user_email != reporter_email {
        return Err(TransitionError::NotReporter);
    }
    if issue.is_reviewed {
        return Err(TransitionError::AlreadyReviewed);
    }
    let rating = rating.ok_or(TransitionError::MissingRating)?;
    if !(1..=5).contains(&rating) {
        return Err(TransitionError::RatingOutOfRange(rating));
    }

    Ok(IssuePatch {
        rating: Some(rating),
        review: Some(review_text.to_string()),
        is_reviewed: Some(true),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AiAnalysis, Category, Location, Severity};

    fn open_issue() -> Issue {
        Issue {
            id: "issue-1".to_string(),
            title: "Streetlight out".to_string(),
            description: "The pole is dark".to_string(),
            category: Category::StreetLight,
            location: Location::new("Maharashtra", "Pune", "411001", "MG Road"),
            image_url: None,
            status: IssueStatus::Open,
            assigned_to: None,
            price: None,
            contractor_name: None,
            contractor_rating: None,
            contractor_id: None,
            rating: None,
            review: None,
            is_reviewed: false,
            ai_analysis: AiAnalysis {
                category: "Street Light".to_string(),
                severity: Severity::High,
                summary: "Dark pole".to_string(),
                estimated_time: None,
                impact_scope: 60,
            },
            created_at: 1,
            user_id: "uid-1".to_string(),
            user_email: "citizen@example.com".to_string(),
            user_name: "Citizen".to_string(),
        }
    }

    fn accepted_issue() -> Issue {
        let mut issue = open_issue();
        issue.status = IssueStatus::Accepted;
        issue.assigned_to = Some(Trade::Electrician);
        issue.price = Some(1200.0);
        issue
    }

    fn electrician_in(city: &str) -> ContractorProfile {
        ContractorProfile {
            display_name: "Spark Bros".to_string(),
            agency_name: None,
            trade: Trade::Electrician,
            operating_state: "Maharashtra".to_string(),
            operating_city: city.to_string(),
            rating: 4.5,
        }
    }

    // ── dispatch ────────────────────────────────────────────────────

    #[test]
    fn dispatch_requires_a_price() {
        let issue = open_issue();
        assert_eq!(
            dispatch(&issue, Trade::Electrician, None).unwrap_err(),
            TransitionError::MissingPrice
        );
        assert_eq!(
            dispatch(&issue, Trade::Electrician, Some(0.0)).unwrap_err(),
            TransitionError::InvalidPrice
        );
    }

    #[test]
    fn dispatch_stamps_trade_and_price() {
        let patch = dispatch(&open_issue(), Trade::Electrician, Some(1200.0)).unwrap();
        assert_eq!(patch.status, Some(IssueStatus::Accepted));
        assert_eq!(patch.assigned_to, Some(Trade::Electrician));
        assert_eq!(patch.price, Some(1200.0));
    }

    #[test]
    fn dispatch_rejects_non_open_issue() {
        let err = dispatch(&accepted_issue(), Trade::Electrician, Some(10.0)).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    // ── claim ───────────────────────────────────────────────────────

    #[test]
    fn claim_stamps_contractor_identity() {
        let patch = claim(&accepted_issue(), &electrician_in("Pune")).unwrap();
        assert_eq!(patch.status, Some(IssueStatus::InProgress));
        assert_eq!(patch.contractor_name.as_deref(), Some("Spark Bros"));
        assert_eq!(patch.contractor_rating, Some(4.5));
        assert_eq!(patch.contractor_id.as_deref(), Some("Electrician"));
    }

    #[test]
    fn claim_rejects_wrong_city() {
        assert_eq!(
            claim(&accepted_issue(), &electrician_in("Mumbai")).unwrap_err(),
            TransitionError::CityMismatch
        );
    }

    #[test]
    fn claim_rejects_wrong_trade() {
        let mut plumber = electrician_in("Pune");
        plumber.trade = Trade::Plumber;
        assert!(matches!(
            claim(&accepted_issue(), &plumber).unwrap_err(),
            TransitionError::TradeMismatch { .. }
        ));
    }

    #[test]
    fn all_rounder_claims_any_trade_in_city() {
        let mut jack = electrician_in("Pune");
        jack.trade = Trade::AllRounder;
        assert!(claim(&accepted_issue(), &jack).is_ok());
    }

    #[test]
    fn claim_rejects_open_issue() {
        let err = claim(&open_issue(), &electrician_in("Pune")).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    // ── resolve / reopen ────────────────────────────────────────────

    fn in_progress_issue() -> Issue {
        let mut issue = accepted_issue();
        issue.status = IssueStatus::InProgress;
        issue.contractor_name = Some("Spark Bros".to_string());
        issue
    }

    #[test]
    fn claimant_resolves_own_job() {
        let patch = resolve(
            &in_progress_issue(),
            &ResolveActor::Contractor {
                display_name: "Spark Bros".to_string(),
            },
        )
        .unwrap();
        assert_eq!(patch.status, Some(IssueStatus::Resolved));
    }

    #[test]
    fn other_contractor_cannot_resolve() {
        let err = resolve(
            &in_progress_issue(),
            &ResolveActor::Contractor {
                display_name: "Someone Else".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::NotClaimant);
    }

    #[test]
    fn admin_force_resolves() {
        assert!(resolve(&in_progress_issue(), &ResolveActor::Admin).is_ok());
    }

    #[test]
    fn reopen_only_from_resolved() {
        let mut issue = in_progress_issue();
        assert!(reopen(&issue).is_err());
        issue.status = IssueStatus::Resolved;
        let patch = reopen(&issue).unwrap();
        assert_eq!(patch.status, Some(IssueStatus::Open));
        // Nothing else is cleared by the patch
        assert_eq!(patch.contractor_name, None);
        assert_eq!(patch.price, None);
    }

    // ── review ──────────────────────────────────────────────────────

    fn resolved_issue() -> Issue {
        let mut issue = in_progress_issue();
        issue.status = IssueStatus::Resolved;
        issue
    }

    #[test]
    fn reporter_reviews_once() {
        let issue = resolved_issue();
        let patch = review(&issue, "uid-1", "citizen@example.com", Some(5), "Great job").unwrap();
        assert_eq!(patch.rating, Some(5));
        assert_eq!(patch.is_reviewed, Some(true));
    }

    #[test]
    fn review_matches_reporter_by_uid_or_email() {
        let issue = resolved_issue();
        assert!(review(&issue, "uid-1", "other@example.com", Some(4), "").is_ok());
        assert!(review(&issue, "other-uid", "citizen@example.com", Some(4), "").is_ok());
        assert_eq!(
            review(&issue, "other-uid", "other@example.com", Some(4), "").unwrap_err(),
            TransitionError::NotReporter
        );
    }

    #[test]
    fn second_review_is_rejected() {
        let mut issue = resolved_issue();
        issue.is_reviewed = true;
        issue.rating = Some(4);
        assert_eq!(
            review(&issue, "uid-1", "citizen@example.com", Some(5), "again").unwrap_err(),
            TransitionError::AlreadyReviewed
        );
    }

    #[test]
    fn review_requires_in_range_rating() {
        let issue = resolved_issue();
        assert_eq!(
            review(&issue, "uid-1", "citizen@example.com", None, "").unwrap_err(),
            TransitionError::MissingRating
        );
        assert_eq!(
            review(&issue, "uid-1", "citizen@example.com", Some(6), "").unwrap_err(),
            TransitionError::RatingOutOfRange(6)
        );
    }

    #[test]
    fn review_requires_resolved_status() {
        let issue = in_progress_issue();
        assert!(matches!(
            review(&issue, "uid-1", "citizen@example.com", Some(5), "").unwrap_err(),
            TransitionError::InvalidTransition { .. }
        ));
    }
}

//! Issue Service
//!
//! Orchestrates the report lifecycle over the store adapter and the
//! advisory engine. Handlers stay thin: they extract identity and the
//! request body, then call a service method. Every transition validates
//! against the current document before the store is touched, so invalid
//! requests never produce a write.

use std::sync::Arc;

use shared::models::{ContractorProfile, GeoPoint, Issue, IssueStatus, Location};
use shared::request::{AdviceRequest, CreateIssueRequest, DispatchRequest, ReviewRequest};
use shared::response::{AdminStatsResponse, ContractorJobsResponse, MyReportsResponse};
use shared::AdvisoryRecord;

use crate::advisory::{AdvisoryEngine, AdvisoryInput};
use crate::store::{IssueSnapshot, IssueStore, StoreError};
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_ADDRESS_LEN, MAX_SHORT_TEXT_LEN,
    MAX_TEXT_LEN, MAX_TITLE_LEN, MAX_URL_LEN,
};
use crate::utils::{AppError, AppResult};
use crate::issues::{export, matching, transitions};
use crate::issues::transitions::ResolveActor;

/// Reporter identity extracted from the session token
#[derive(Debug, Clone)]
pub struct Reporter {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Fallback geocoordinate attached when the reporter's device gives none.
/// Not guaranteed accurate; the dashboard map treats it as approximate.
const FALLBACK_GEO: GeoPoint = GeoPoint {
    lat: 12.9716,
    lng: 77.5946,
};

#[derive(Clone)]
pub struct IssueService {
    store: Arc<dyn IssueStore>,
    advisory: Arc<AdvisoryEngine>,
}

impl IssueService {
    pub fn new(store: Arc<dyn IssueStore>, advisory: Arc<AdvisoryEngine>) -> Self {
        Self { store, advisory }
    }

    pub fn store(&self) -> &Arc<dyn IssueStore> {
        &self.store
    }

    pub fn advisory_provider_count(&self) -> usize {
        self.advisory.provider_count()
    }

    // ========== Advisory ==========

    /// Standalone advice, used by the report form before submission.
    /// Never fails: the engine degrades through its fallback chain.
    pub async fn advice(&self, req: AdviceRequest) -> AdvisoryRecord {
        self.advisory
            .get_advice(&AdvisoryInput {
                title: req.title,
                description: req.description,
                image: req.image,
            })
            .await
    }

    // ========== Citizen ==========

    /// Validate, run the advisory chain, and persist a new Open issue.
    pub async fn create_report(
        &self,
        reporter: &Reporter,
        req: CreateIssueRequest,
    ) -> AppResult<Issue> {
        validate_required_text(&req.title, "title", MAX_TITLE_LEN)?;
        validate_required_text(&req.description, "description", MAX_TEXT_LEN)?;
        validate_required_text(&req.state, "state", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.city, "city", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;
        validate_required_text(&req.address_detail, "addressDetail", MAX_ADDRESS_LEN)?;
        validate_optional_text(req.image_url.as_deref(), "imageUrl", MAX_URL_LEN)?;

        let advice = self
            .advisory
            .get_advice(&AdvisoryInput {
                title: Some(req.title.clone()),
                description: req.description.clone(),
                image: req.image,
            })
            .await;

        let mut location = Location::new(&req.state, &req.city, &req.pincode, &req.address_detail);
        location.geo = Some(FALLBACK_GEO);

        let issue = Issue {
            // Assigned by the store
            id: String::new(),
            created_at: 0,
            title: req.title,
            description: req.description,
            category: req.category,
            location,
            image_url: req.image_url,
            status: IssueStatus::Open,
            assigned_to: None,
            price: None,
            contractor_name: None,
            contractor_rating: None,
            contractor_id: None,
            rating: None,
            review: None,
            is_reviewed: false,
            ai_analysis: advice.into(),
            user_id: reporter.uid.clone(),
            user_email: reporter.email.clone(),
            user_name: reporter.display_name.clone(),
        };

        let stored = self.store.create(issue).await?;
        tracing::info!(
            issue_id = %stored.id,
            category = %stored.category,
            city = %stored.location.city,
            "issue reported"
        );
        Ok(stored)
    }

    pub async fn my_reports(&self, reporter: &Reporter) -> AppResult<MyReportsResponse> {
        let snapshot = self.store.snapshot().await?;
        let reports = matching::my_reports(&snapshot, &reporter.uid, &reporter.email);
        let in_progress = reports
            .iter()
            .filter(|i| i.status == IssueStatus::InProgress)
            .count();
        let resolved = reports
            .iter()
            .filter(|i| i.status == IssueStatus::Resolved)
            .count();
        Ok(MyReportsResponse {
            total: reports.len(),
            in_progress,
            resolved,
            reports,
        })
    }

    /// Reporter's post-resolution review; at most one per issue.
    pub async fn review(
        &self,
        reporter: &Reporter,
        id: &str,
        req: ReviewRequest,
    ) -> AppResult<Issue> {
        validate_optional_text(Some(req.review.as_str()), "review", MAX_TEXT_LEN)?;
        let issue = self.store.get(id).await?;
        let patch = transitions::review(
            &issue,
            &reporter.uid,
            &reporter.email,
            req.rating,
            &req.review,
        )?;
        Ok(self.store.update(id, patch).await?)
    }

    // ========== Admin ==========

    pub async fn list(&self) -> AppResult<IssueSnapshot> {
        Ok(self.store.snapshot().await?)
    }

    pub async fn dispatch(&self, id: &str, req: DispatchRequest) -> AppResult<Issue> {
        let issue = self.store.get(id).await?;
        let patch = transitions::dispatch(&issue, req.assigned_to, req.price)?;
        let updated = self.store.update(id, patch).await?;
        tracing::info!(issue_id = %id, trade = %req.assigned_to, "issue dispatched");
        Ok(updated)
    }

    pub async fn reopen(&self, id: &str) -> AppResult<Issue> {
        let issue = self.store.get(id).await?;
        let patch = transitions::reopen(&issue)?;
        Ok(self.store.update(id, patch).await?)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(id).await?;
        tracing::info!(issue_id = %id, "issue deleted");
        Ok(())
    }

    pub async fn admin_stats(&self) -> AppResult<AdminStatsResponse> {
        let snapshot = self.store.snapshot().await?;
        Ok(matching::admin_stats(&snapshot))
    }

    pub async fn export_csv(&self) -> AppResult<String> {
        let snapshot = self.store.snapshot().await?;
        Ok(export::issues_to_csv(&snapshot))
    }

    // ========== Contractor ==========

    pub async fn contractor_jobs(
        &self,
        contractor: &ContractorProfile,
    ) -> AppResult<ContractorJobsResponse> {
        let snapshot = self.store.snapshot().await?;
        let views = matching::contractor_views(&snapshot, contractor);
        let total_earnings = matching::total_earnings(&views.history);
        Ok(ContractorJobsResponse {
            available: views.available,
            active: views.active,
            history: views.history,
            total_earnings,
        })
    }

    /// Claim an Accepted job. The write is conditional on the status still
    /// being Accepted, so of two racing contractors exactly one wins and
    /// the other gets a conflict.
    pub async fn claim(&self, contractor: &ContractorProfile, id: &str) -> AppResult<Issue> {
        let issue = self.store.get(id).await?;
        let patch = transitions::claim(&issue, contractor)?;
        match self
            .store
            .update_if_status(id, IssueStatus::Accepted, patch)
            .await
        {
            Ok(updated) => {
                tracing::info!(
                    issue_id = %id,
                    contractor = %contractor.display_name,
                    "job claimed"
                );
                Ok(updated)
            }
            Err(StoreError::StatusConflict { .. }) => Err(AppError::conflict(
                "this job has already been claimed by another contractor",
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve an In Progress job. Contractors may only resolve their own
    /// claims; admins may force-resolve any.
    pub async fn resolve(&self, actor: &ResolveActor, id: &str) -> AppResult<Issue> {
        let issue = self.store.get(id).await?;
        let patch = transitions::resolve(&issue, actor)?;
        Ok(self.store.update(id, patch).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use shared::models::{IssuePatch, Trade};
    use tokio::sync::broadcast;

    use crate::store::MemoryIssueStore;

    fn service() -> IssueService {
        IssueService::new(
            Arc::new(MemoryIssueStore::new()),
            Arc::new(AdvisoryEngine::new(Vec::new(), Duration::from_millis(50))),
        )
    }

    fn reporter() -> Reporter {
        Reporter {
            uid: "uid-1".to_string(),
            email: "citizen@example.com".to_string(),
            display_name: "Citizen".to_string(),
        }
    }

    fn report_in(city: &str, description: &str) -> CreateIssueRequest {
        CreateIssueRequest {
            category: shared::models::Category::Other,
            title: "Something broken".to_string(),
            description: description.to_string(),
            state: "Maharashtra".to_string(),
            city: city.to_string(),
            pincode: "411001".to_string(),
            address_detail: "Near the market".to_string(),
            image_url: None,
            image: None,
        }
    }

    fn plumber(name: &str, city: &str) -> ContractorProfile {
        ContractorProfile {
            display_name: name.to_string(),
            agency_name: None,
            trade: Trade::Plumber,
            operating_state: "Maharashtra".to_string(),
            operating_city: city.to_string(),
            rating: 4.2,
        }
    }

    /// Store double that counts writes, for asserting that rejected
    /// transitions never reach the store.
    struct CountingStore {
        inner: MemoryIssueStore,
        updates: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: MemoryIssueStore::new(),
                updates: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IssueStore for CountingStore {
        async fn create(&self, issue: Issue) -> Result<Issue, StoreError> {
            self.inner.create(issue).await
        }
        async fn snapshot(&self) -> Result<IssueSnapshot, StoreError> {
            self.inner.snapshot().await
        }
        fn subscribe(&self) -> broadcast::Receiver<IssueSnapshot> {
            self.inner.subscribe()
        }
        async fn get(&self, id: &str) -> Result<Issue, StoreError> {
            self.inner.get(id).await
        }
        async fn update(&self, id: &str, patch: IssuePatch) -> Result<Issue, StoreError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update(id, patch).await
        }
        async fn update_if_status(
            &self,
            id: &str,
            expected: IssueStatus,
            patch: IssuePatch,
        ) -> Result<Issue, StoreError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            self.inner.update_if_status(id, expected, patch).await
        }
        async fn delete(&self, id: &str) -> Result<(), StoreError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn create_report_assigns_identity_and_advice() {
        let svc = service();
        let issue = svc
            .create_report(&reporter(), report_in("Pune", "Water leaking from a burst pipe"))
            .await
            .unwrap();

        assert!(!issue.id.is_empty());
        assert_eq!(issue.status, IssueStatus::Open);
        assert_eq!(issue.user_id, "uid-1");
        // Keyword rules kick in with no providers configured
        assert_eq!(issue.ai_analysis.category, "Water Leakage");
        assert_eq!(issue.location.geo, Some(FALLBACK_GEO));
    }

    #[tokio::test]
    async fn create_report_rejects_blank_title() {
        let svc = service();
        let mut req = report_in("Pune", "desc");
        req.title = "   ".to_string();
        assert!(svc.create_report(&reporter(), req).await.is_err());
    }

    #[tokio::test]
    async fn dispatch_without_price_never_touches_the_store() {
        let store = Arc::new(CountingStore::new());
        let svc = IssueService::new(
            store.clone(),
            Arc::new(AdvisoryEngine::new(Vec::new(), Duration::from_millis(50))),
        );
        let issue = svc
            .create_report(&reporter(), report_in("Pune", "burst pipe"))
            .await
            .unwrap();

        let err = svc
            .dispatch(
                &issue.id,
                DispatchRequest {
                    assigned_to: Trade::Plumber,
                    price: None,
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("price"));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn full_lifecycle_open_to_reviewed() {
        let svc = service();
        let issue = svc
            .create_report(&reporter(), report_in("Pune", "burst pipe flooding"))
            .await
            .unwrap();

        let issue = svc
            .dispatch(
                &issue.id,
                DispatchRequest {
                    assigned_to: Trade::Plumber,
                    price: Some(800.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(issue.status, IssueStatus::Accepted);

        let worker = plumber("Pipes Co", "Pune");
        let issue = svc.claim(&worker, &issue.id).await.unwrap();
        assert_eq!(issue.status, IssueStatus::InProgress);
        assert_eq!(issue.contractor_name.as_deref(), Some("Pipes Co"));

        let issue = svc
            .resolve(
                &ResolveActor::Contractor {
                    display_name: "Pipes Co".to_string(),
                },
                &issue.id,
            )
            .await
            .unwrap();
        assert_eq!(issue.status, IssueStatus::Resolved);

        let issue = svc
            .review(
                &reporter(),
                &issue.id,
                ReviewRequest {
                    rating: Some(5),
                    review: "Fixed quickly".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(issue.is_reviewed);
        assert_eq!(issue.rating, Some(5));

        // Second review bounces
        let err = svc
            .review(
                &reporter(),
                &issue.id,
                ReviewRequest {
                    rating: Some(1),
                    review: "changed my mind".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already"));
    }

    #[tokio::test]
    async fn second_claim_gets_a_conflict() {
        let svc = service();
        let issue = svc
            .create_report(&reporter(), report_in("Pune", "burst pipe"))
            .await
            .unwrap();
        svc.dispatch(
            &issue.id,
            DispatchRequest {
                assigned_to: Trade::Plumber,
                price: Some(500.0),
            },
        )
        .await
        .unwrap();

        let first = plumber("First Crew", "Pune");
        let second = plumber("Second Crew", "Pune");
        svc.claim(&first, &issue.id).await.unwrap();
        let err = svc.claim(&second, &issue.id).await.unwrap_err();
        assert!(err.to_string().contains("claim"));

        // Winner's stamp is intact
        let stored = svc.store().get(&issue.id).await.unwrap();
        assert_eq!(stored.contractor_name.as_deref(), Some("First Crew"));
    }

    #[tokio::test]
    async fn reopen_preserves_contractor_stamp() {
        let svc = service();
        let issue = svc
            .create_report(&reporter(), report_in("Pune", "burst pipe"))
            .await
            .unwrap();
        svc.dispatch(
            &issue.id,
            DispatchRequest {
                assigned_to: Trade::Plumber,
                price: Some(500.0),
            },
        )
        .await
        .unwrap();
        svc.claim(&plumber("Pipes Co", "Pune"), &issue.id)
            .await
            .unwrap();
        svc.resolve(&ResolveActor::Admin, &issue.id).await.unwrap();

        let reopened = svc.reopen(&issue.id).await.unwrap();
        assert_eq!(reopened.status, IssueStatus::Open);
        assert_eq!(reopened.contractor_name.as_deref(), Some("Pipes Co"));
        assert_eq!(reopened.price, Some(500.0));
    }

    #[tokio::test]
    async fn my_reports_counts_statuses() {
        let svc = service();
        let a = svc
            .create_report(&reporter(), report_in("Pune", "burst pipe"))
            .await
            .unwrap();
        svc.create_report(&reporter(), report_in("Pune", "garbage pile"))
            .await
            .unwrap();

        svc.dispatch(
            &a.id,
            DispatchRequest {
                assigned_to: Trade::Plumber,
                price: Some(100.0),
            },
        )
        .await
        .unwrap();
        svc.claim(&plumber("Pipes Co", "Pune"), &a.id).await.unwrap();

        let mine = svc.my_reports(&reporter()).await.unwrap();
        assert_eq!(mine.total, 2);
        assert_eq!(mine.in_progress, 1);
        assert_eq!(mine.resolved, 0);
    }
}

use std::sync::Arc;

use crate::advisory::AdvisoryEngine;
use crate::auth::{ContractorDirectory, JwtService, StaticDirectory};
use crate::core::Config;
use crate::issues::IssueService;
use crate::store::{IssueStore, MemoryIssueStore};

/// Server state - shared handles to every service
///
/// Cloned freely (all fields are `Arc`-backed); one instance is created at
/// startup and handed to the router.
///
/// | Field | Notes |
/// |-------|-------|
/// | config | immutable configuration |
/// | store | issue collection adapter |
/// | issues | lifecycle service over store + advisory |
/// | jwt | session token service |
/// | directory | approved-contractor allowlist |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    store: Arc<dyn IssueStore>,
    issues: IssueService,
    jwt: Arc<JwtService>,
    directory: Arc<dyn ContractorDirectory>,
}

impl ServerState {
    /// Wire up every service from configuration.
    pub fn initialize(config: &Config) -> Self {
        let store: Arc<dyn IssueStore> = Arc::new(MemoryIssueStore::new());
        let advisory = Arc::new(AdvisoryEngine::from_config(config));
        let issues = IssueService::new(store.clone(), advisory);

        let directory: Arc<dyn ContractorDirectory> = match &config.contractor_directory_path {
            Some(path) => match StaticDirectory::from_file(path) {
                Ok(dir) => Arc::new(dir),
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "contractor directory load failed, using built-in defaults");
                    Arc::new(StaticDirectory::builtin())
                }
            },
            None => Arc::new(StaticDirectory::builtin()),
        };

        Self {
            config: Arc::new(config.clone()),
            store,
            issues,
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            directory,
        }
    }

    /// State with injected collaborators, for tests.
    pub fn with_services(
        config: Config,
        store: Arc<dyn IssueStore>,
        advisory: Arc<AdvisoryEngine>,
        directory: Arc<dyn ContractorDirectory>,
    ) -> Self {
        let issues = IssueService::new(store.clone(), advisory);
        Self {
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            config: Arc::new(config),
            store,
            issues,
            directory,
        }
    }

    pub fn issues(&self) -> &IssueService {
        &self.issues
    }

    pub fn store(&self) -> &Arc<dyn IssueStore> {
        &self.store
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    pub fn directory(&self) -> &dyn ContractorDirectory {
        self.directory.as_ref()
    }
}

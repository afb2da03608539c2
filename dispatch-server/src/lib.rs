//! Dispatch Server - civic issue reporting and contractor dispatch
//!
//! # Overview
//!
//! Citizens report civic issues (potholes, streetlights, leaks...), an
//! advisory chain grades each report, an admin dispatches jobs to trade
//! departments with a budget, and approved contractors claim and resolve
//! them. Derived views (job boards, dashboards) are recomputed from full
//! ordered snapshots of the issue collection.
//!
//! # Module structure
//!
//! ```text
//! dispatch-server/src/
//! ├── core/          # configuration, state, server lifecycle
//! ├── auth/          # JWT sessions, contractor allowlist, guards
//! ├── advisory/      # provider chain: Gemini → OpenRouter → rules → static
//! ├── store/         # issue collection adapter + embedded implementation
//! ├── issues/        # state machine, matching, service, CSV export
//! ├── api/           # HTTP routes and handlers (REST + SSE)
//! └── utils/         # errors, logging, validation
//! ```

pub mod advisory;
pub mod api;
pub mod auth;
pub mod core;
pub mod issues;
pub mod store;
pub mod utils;

// Re-export the commonly used types
pub use auth::{CurrentUser, JwtService};
pub use core::{router, Config, Server, ServerState};
pub use issues::{IssueService, Reporter};
pub use store::{IssueStore, MemoryIssueStore};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging; called once at startup.
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ____  _                  __       __
   / __ \(_)________  ____ _/ /______/ /_
  / / / / / ___/ __ \/ __ `/ __/ ___/ __ \
 / /_/ / (__  ) /_/ / /_/ / /_/ /__/ / / /
/_____/_/____/ .___/\__,_/\__/\___/_/ /_/
            /_/
    "#
    );
}

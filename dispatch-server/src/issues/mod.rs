//! Issue lifecycle: state machine, matching, aggregation, export
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Issue Lifecycle                       │
//! │                                                             │
//! │   Open ──dispatch──▶ Accepted ──claim──▶ In Progress        │
//! │    ▲    (admin,       (contractor,         │                │
//! │    │     trade+price)  city+trade match)   │ resolve        │
//! │    │                                       ▼                │
//! │    └────────────re-open (admin)──────── Resolved            │
//! │                                            │                │
//! │                                         review (reporter,   │
//! │                                          once, rating 1-5)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `transitions` holds the checked patch constructors, `matching` the pure
//! view/aggregation functions, `service` the orchestration over the store
//! and the advisory engine, `export` the CSV renderer.

pub mod export;
pub mod matching;
pub mod service;
pub mod transitions;

pub use service::{IssueService, Reporter};
pub use transitions::ResolveActor;

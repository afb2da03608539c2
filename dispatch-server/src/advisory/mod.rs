//! Advisory Engine module
//!
//! Produces the structured advisory record embedded into every new report:
//!
//! - **engine**: the ordered fallback chain (remote providers → local
//!   keyword rules → static fallback), infallible by contract
//! - **provider**: the strategy trait each chain stage conforms to
//! - **gemini** / **openrouter**: the two remote provider stages
//! - **rules**: the offline regex keyword families

pub mod engine;
pub mod gemini;
pub mod openrouter;
pub mod provider;
pub mod rules;

pub use engine::{AdvisoryEngine, static_fallback};
pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;
pub use provider::{AdvisoryInput, AdvisoryProvider, ProviderError};

use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Env var | Default | Notes |
/// |---------|---------|-------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ADMIN_PIN | 1234 | admin login PIN (change it) |
/// | CONTRACTOR_DIRECTORY_PATH | (unset) | JSON allowlist; built-in demo directory when unset |
/// | GEMINI_API_KEY | (unset) | primary advisory provider, skipped when unset |
/// | GEMINI_MODEL | gemini-1.5-flash | |
/// | OPENROUTER_API_KEY | (unset) | secondary advisory provider, skipped when unset |
/// | OPENROUTER_MODEL | openai/gpt-4o-mini | |
/// | ADVISORY_TIMEOUT_MS | 8000 | per-provider timeout |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | (unset) | daily-rolling file logs when set |
/// | ENVIRONMENT | development | development \| staging \| production |
///
/// JWT_* variables are documented on [`JwtConfig`].
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 ADMIN_PIN=775533 GEMINI_API_KEY=... cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// JWT session configuration
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,

    // === Auth ===
    /// Admin login PIN
    pub admin_pin: String,
    /// Path to the contractor allowlist JSON, built-in defaults when unset
    pub contractor_directory_path: Option<String>,

    // === Advisory chain ===
    /// Primary (multimodal) provider credential; provider skipped when unset
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Secondary (text-only) provider credential; provider skipped when unset
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    /// Per-provider timeout (milliseconds)
    pub advisory_timeout_ms: u64,

    // === Logging ===
    pub log_level: String,
    /// Daily-rolling file logs when set
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            admin_pin: std::env::var("ADMIN_PIN").unwrap_or_else(|_| "1234".into()),
            contractor_directory_path: std::env::var("CONTRACTOR_DIRECTORY_PATH").ok(),

            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".into()),
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            openrouter_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "openai/gpt-4o-mini".into()),
            advisory_timeout_ms: std::env::var("ADVISORY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),

            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

//! Authentication: JWT sessions, login guards, contractor allowlist

pub mod directory;
pub mod jwt;
pub mod middleware;

pub use directory::{ContractorDirectory, ContractorRecord, StaticDirectory};
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};

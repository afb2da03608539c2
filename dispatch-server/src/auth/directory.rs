//! Contractor directory
//!
//! Authorization collaborator for contractor logins: an allowlist of
//! approved agencies keyed by email, each with its trade and access PIN.
//! The production directory is maintained externally; this module defines
//! the lookup contract and ships a static implementation loaded from a
//! JSON file (or built-in defaults when none is configured).

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::models::{ContractorProfile, Trade};

/// One approved contractor agency
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractorRecord {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub agency_name: Option<String>,
    pub trade: Trade,
    /// Access PIN checked at login
    pub pin: String,
    /// Public rating stamped onto claimed jobs
    #[serde(default = "default_rating")]
    pub rating: f64,
}

fn default_rating() -> f64 {
    4.0
}

impl ContractorRecord {
    /// Build the session profile, stamped with the operating area the
    /// contractor declared at login.
    pub fn profile(&self, operating_state: &str, operating_city: &str) -> ContractorProfile {
        ContractorProfile {
            display_name: self.display_name.clone(),
            agency_name: self.agency_name.clone(),
            trade: self.trade,
            operating_state: operating_state.to_string(),
            operating_city: operating_city.to_string(),
            rating: self.rating,
        }
    }
}

/// Approved-contractor lookup
pub trait ContractorDirectory: Send + Sync {
    /// Case-insensitive lookup by email.
    fn lookup(&self, email: &str) -> Option<ContractorRecord>;
}

/// In-memory directory backed by a JSON file or built-in defaults
pub struct StaticDirectory {
    records: Vec<ContractorRecord>,
}

impl StaticDirectory {
    pub fn new(records: Vec<ContractorRecord>) -> Self {
        Self { records }
    }

    /// Load from a JSON array of contractor records.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let records: Vec<ContractorRecord> = serde_json::from_str(&raw)?;
        tracing::info!(
            count = records.len(),
            path = %path.as_ref().display(),
            "contractor directory loaded"
        );
        Ok(Self::new(records))
    }

    /// Demo agencies, one per trade. Replaced by CONTRACTOR_DIRECTORY_PATH
    /// in any real deployment.
    pub fn builtin() -> Self {
        let record = |email: &str, name: &str, agency: &str, trade: Trade, rating: f64| {
            ContractorRecord {
                email: email.to_string(),
                display_name: name.to_string(),
                agency_name: Some(agency.to_string()),
                trade,
                pin: "4321".to_string(),
                rating,
            }
        };
        Self::new(vec![
            record(
                "sparkbros@example.com",
                "Spark Bros",
                "Spark Bros Electricals",
                Trade::Electrician,
                4.5,
            ),
            record(
                "pipesco@example.com",
                "Pipes Co",
                "Pipes & Co Plumbing",
                Trade::Plumber,
                4.2,
            ),
            record(
                "cleansweep@example.com",
                "Clean Sweep",
                "Clean Sweep Services",
                Trade::GarbageCollector,
                4.0,
            ),
            record(
                "roadworks@example.com",
                "RoadWorks",
                "RoadWorks Infra",
                Trade::RoadMaintenance,
                4.3,
            ),
            record(
                "fixitall@example.com",
                "FixItAll",
                "FixItAll General Services",
                Trade::AllRounder,
                3.9,
            ),
        ])
    }
}

impl ContractorDirectory for StaticDirectory {
    fn lookup(&self, email: &str) -> Option<ContractorRecord> {
        let email = email.trim();
        self.records
            .iter()
            .find(|r| r.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        let dir = StaticDirectory::builtin();
        let record = dir.lookup(" SparkBros@Example.com ").unwrap();
        assert_eq!(record.trade, Trade::Electrician);
        assert!(dir.lookup("unknown@example.com").is_none());
    }

    #[test]
    fn loads_records_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"email":"a@b.com","displayName":"Crew A","trade":"Plumber","pin":"9999"}}]"#
        )
        .unwrap();

        let dir = StaticDirectory::from_file(file.path()).unwrap();
        let record = dir.lookup("a@b.com").unwrap();
        assert_eq!(record.pin, "9999");
        // Defaults fill the optional fields
        assert_eq!(record.rating, 4.0);
        assert!(record.agency_name.is_none());
    }

    #[test]
    fn profile_carries_declared_operating_area() {
        let dir = StaticDirectory::builtin();
        let profile = dir
            .lookup("pipesco@example.com")
            .unwrap()
            .profile("Maharashtra", "Pune");
        assert_eq!(profile.operating_city, "Pune");
        assert_eq!(profile.trade, Trade::Plumber);
    }
}

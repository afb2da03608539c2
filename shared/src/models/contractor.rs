//! Contractor trade taxonomy and session profile

use serde::{Deserialize, Serialize};

/// Contractor specialization (fixed five-trade taxonomy)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Trade {
    Electrician,
    Plumber,
    #[serde(rename = "Garbage Collector")]
    GarbageCollector,
    #[serde(rename = "Road Maintenance")]
    RoadMaintenance,
    #[serde(rename = "All Rounder")]
    AllRounder,
}

impl Trade {
    pub const ALL: [Trade; 5] = [
        Trade::Electrician,
        Trade::Plumber,
        Trade::GarbageCollector,
        Trade::RoadMaintenance,
        Trade::AllRounder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trade::Electrician => "Electrician",
            Trade::Plumber => "Plumber",
            Trade::GarbageCollector => "Garbage Collector",
            Trade::RoadMaintenance => "Road Maintenance",
            Trade::AllRounder => "All Rounder",
        }
    }

    /// Case-insensitive parse of a trade label.
    pub fn parse(s: &str) -> Option<Trade> {
        Trade::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Category labels this trade also services, beyond its own name.
    ///
    /// An Accepted issue is visible to a contractor when its `assignedTo`
    /// equals the trade, or its advisory category is one of these aliases.
    /// All Rounder matches everything and has no alias list of its own.
    pub fn category_aliases(&self) -> &'static [&'static str] {
        match self {
            Trade::Electrician => &["Electrician", "Street Light"],
            Trade::Plumber => &["Plumber", "Water Leakage"],
            Trade::GarbageCollector => &["Garbage Collector", "Garbage"],
            Trade::RoadMaintenance => &["Road Maintenance", "Potholes"],
            Trade::AllRounder => &[],
        }
    }

    /// Whether an advisory category label falls under this trade.
    pub fn covers_category(&self, category: &str) -> bool {
        matches!(self, Trade::AllRounder)
            || self
                .category_aliases()
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(category.trim()))
    }
}

impl std::fmt::Display for Trade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contractor session profile, carried in JWT claims.
///
/// Identity itself is owned by the external sign-in provider; this is the
/// slice the dispatch core needs for matching and stamping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractorProfile {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    pub trade: Trade,
    pub operating_state: String,
    pub operating_city: String,
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_labels_round_trip() {
        for trade in Trade::ALL {
            assert_eq!(Trade::parse(trade.as_str()), Some(trade));
        }
        assert_eq!(Trade::parse("garbage collector"), Some(Trade::GarbageCollector));
        assert_eq!(Trade::parse("Janitor"), None);
    }

    #[test]
    fn electrician_covers_street_light() {
        assert!(Trade::Electrician.covers_category("Street Light"));
        assert!(Trade::Electrician.covers_category("electrician"));
        assert!(!Trade::Electrician.covers_category("Water Leakage"));
    }

    #[test]
    fn all_rounder_covers_everything() {
        assert!(Trade::AllRounder.covers_category("Potholes"));
        assert!(Trade::AllRounder.covers_category("anything at all"));
    }
}

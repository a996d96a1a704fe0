//! History filtering and dashboard counters

use serde::{Deserialize, Serialize};

use super::record::{RiskLevel, VerificationRecord};

/// Risk-level filter of the history table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RiskFilter {
    #[default]
    All,
    Level(RiskLevel),
}

impl RiskFilter {
    pub fn matches(&self, level: RiskLevel) -> bool {
        match self {
            RiskFilter::All => true,
            RiskFilter::Level(wanted) => *wanted == level,
        }
    }
}

impl std::str::FromStr for RiskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(RiskFilter::All);
        }
        s.parse().map(RiskFilter::Level)
    }
}

impl TryFrom<String> for RiskFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RiskFilter> for String {
    fn from(value: RiskFilter) -> Self {
        match value {
            RiskFilter::All => "all".to_string(),
            RiskFilter::Level(level) => level.to_string(),
        }
    }
}

/// Search term plus risk filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub risk_filter: RiskFilter,
}

impl HistoryFilter {
    /// Name matches case-insensitively, AADHAR number matches exactly
    pub fn matches(&self, record: &VerificationRecord) -> bool {
        let term = self.search_term.to_lowercase();
        let matches_search = record.name.to_lowercase().contains(&term)
            || record.aadhar_number.contains(&self.search_term);

        matches_search && self.risk_filter.matches(record.risk_level)
    }

    pub fn apply<'a>(&self, records: &'a [VerificationRecord]) -> Vec<&'a VerificationRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub verified: usize,
    pub flagged: usize,
}

impl DashboardStats {
    pub fn from_records(records: &[VerificationRecord]) -> Self {
        Self {
            total: records.len(),
            verified: records.iter().filter(|r| r.is_verified()).count(),
            flagged: records.iter().filter(|r| r.is_flagged()).count(),
        }
    }
}

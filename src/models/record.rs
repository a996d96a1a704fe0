//! Verification record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Prefix of every generated record id
pub const RECORD_ID_PREFIX: &str = "VER";

/// Maximum length of the AADHAR number field
pub const AADHAR_MAX_LEN: usize = 12;

/// Identity document submitted with a verification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentType {
    #[default]
    Aadhar,
    Pan,
    Utility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(format!("Unknown risk level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Flagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentAuthenticity {
    Valid,
    Suspicious,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressVerification {
    Verified,
    Mismatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
    pub document_authenticity: DocumentAuthenticity,
    pub address_verification: AddressVerification,
    /// Two-decimal text in [0, 10)
    pub anomaly_score: String,
}

/// A completed verification, as persisted and served
///
/// Records are append-only: nothing in the crate mutates one after the
/// provider returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    pub id: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub aadhar_number: String,
    pub address: String,
    pub document_type: DocumentType,
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
    pub status: VerificationStatus,
    pub details: VerificationDetails,
}

impl VerificationRecord {
    /// Id for a record created at `at`
    pub fn generate_id(at: DateTime<Utc>) -> String {
        format!("{}{}", RECORD_ID_PREFIX, at.timestamp_millis())
    }

    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified
    }

    pub fn is_flagged(&self) -> bool {
        self.status == VerificationStatus::Flagged
    }
}

/// Identity data submitted for verification
///
/// Also serves as the dashboard's form state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 12, message = "AADHAR number must be 1 to 12 characters"))]
    pub aadhar_number: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub document_type: DocumentType,
}

impl VerificationRequest {
    /// Both required fields are filled in
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.aadhar_number.is_empty()
    }
}

/// Partial form update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormUpdate {
    pub name: Option<String>,
    pub aadhar_number: Option<String>,
    pub address: Option<String>,
    pub document_type: Option<DocumentType>,
}

impl FormUpdate {
    /// Apply onto `form`, clipping the AADHAR number to its field length
    pub fn apply_to(self, form: &mut VerificationRequest) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(aadhar) = self.aadhar_number {
            form.aadhar_number = aadhar.chars().take(AADHAR_MAX_LEN).collect();
        }
        if let Some(address) = self.address {
            form.address = address;
        }
        if let Some(document_type) = self.document_type {
            form.document_type = document_type;
        }
    }
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

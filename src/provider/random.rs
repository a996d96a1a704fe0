//! Random-outcome provider used in place of a real verification backend

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{ProviderError, VerificationProvider};
use crate::models::{
    AddressVerification, DocumentAuthenticity, RiskLevel, VerificationDetails,
    VerificationRecord, VerificationRequest, VerificationStatus,
};

/// Default simulated latency
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

/// A uniform draw must exceed this for `Verified`
const FLAG_THRESHOLD: f64 = 0.3;
/// A uniform draw must exceed this for `Valid` / address `Verified`
const DETAIL_THRESHOLD: f64 = 0.2;

/// Each outcome field is drawn independently, with no link to
/// `fraud_probability`.
pub struct RandomProvider {
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl RandomProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            delay,
        }
    }

    /// Reproducible outcomes
    pub fn with_seed(seed: u64, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay,
        }
    }

    fn build_record(&self, request: &VerificationRequest) -> VerificationRecord {
        // Millisecond precision, the same as the persisted form
        let now = Utc::now().trunc_subsecs(3);
        let mut rng = self.rng.lock();

        let fraud_probability = rng.gen::<f64>() * 100.0;
        let risk_level = RiskLevel::ALL[rng.gen_range(0..RiskLevel::ALL.len())];
        let status = if rng.gen::<f64>() > FLAG_THRESHOLD {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Flagged
        };
        let document_authenticity = if rng.gen::<f64>() > DETAIL_THRESHOLD {
            DocumentAuthenticity::Valid
        } else {
            DocumentAuthenticity::Suspicious
        };
        let address_verification = if rng.gen::<f64>() > DETAIL_THRESHOLD {
            AddressVerification::Verified
        } else {
            AddressVerification::Mismatch
        };
        // Whole hundredths so the text never rounds up to "10.00"
        let hundredths: u32 = rng.gen_range(0..1000);
        let anomaly_score = format!("{}.{:02}", hundredths / 100, hundredths % 100);

        VerificationRecord {
            id: VerificationRecord::generate_id(now),
            timestamp: now,
            name: request.name.clone(),
            aadhar_number: request.aadhar_number.clone(),
            address: request.address.clone(),
            document_type: request.document_type,
            fraud_probability,
            risk_level,
            status,
            details: VerificationDetails {
                document_authenticity,
                address_verification,
                anomaly_score,
            },
        }
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl VerificationProvider for RandomProvider {
    async fn evaluate(&self, request: &VerificationRequest) -> Result<VerificationRecord, ProviderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let record = self.build_record(request);
        tracing::info!(
            "Mock verification {}: {:?} / {:?} risk",
            record.id, record.status, record.risk_level
        );
        Ok(record)
    }
}

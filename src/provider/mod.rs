//! Verification providers
//!
//! A provider turns a [`VerificationRequest`] into a finished
//! [`VerificationRecord`]. [`RandomProvider`] is the only one shipped;
//! its outcomes are random placeholders, not an assessment of anything.
//! A real identity-verification backend plugs in by implementing
//! [`VerificationProvider`].

pub mod random;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{VerificationRecord, VerificationRequest};

pub use random::RandomProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("verification service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait VerificationProvider: Send + Sync {
    async fn evaluate(&self, request: &VerificationRequest) -> Result<VerificationRecord, ProviderError>;
}

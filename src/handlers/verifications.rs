//! Direct verification handler
//!
//! Verifies a request without touching the dashboard's form or loading
//! flag, the shape a batch importer or external client would call.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{VerificationRecord, VerificationRequest};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<VerificationRequest>,
) -> AppResult<(StatusCode, Json<VerificationRecord>)> {
    req.validate()?;

    let controller = &state.controller;
    let record = controller.provider().evaluate(&req).await?;
    controller.store().save(&record).await;
    controller.refresh().await;

    tracing::info!("Verification created: {}", record.id);

    Ok((StatusCode::CREATED, Json(record)))
}

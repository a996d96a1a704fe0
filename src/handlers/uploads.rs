//! Batch upload handler (placeholder)

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{AppState, AppResult};
use crate::controller::UploadAck;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
}

/// Acknowledge a selected file; nothing is parsed or stored yet
pub async fn acknowledge(
    State(state): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> AppResult<Json<UploadAck>> {
    let ack = state.controller.acknowledge_upload(&req.file_name)?;
    Ok(Json(ack))
}

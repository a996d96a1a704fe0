//! Dashboard session handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::{AppState, AppResult};
use crate::controller::{Page, ViewSnapshot};
use crate::models::{FormUpdate, RiskFilter, VerificationRecord};

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersRequest {
    pub search_term: Option<String>,
    pub risk_filter: Option<RiskFilter>,
}

/// Current page, form, filters and loading flag
pub async fn snapshot(State(state): State<AppState>) -> Json<ViewSnapshot> {
    Json(state.controller.snapshot())
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(req): Json<NavigateRequest>,
) -> Json<ViewSnapshot> {
    state.controller.navigate(req.page);
    Json(state.controller.snapshot())
}

/// Partial form update
pub async fn update_form(
    State(state): State<AppState>,
    Json(req): Json<FormUpdate>,
) -> Json<ViewSnapshot> {
    state.controller.update_form(req);
    Json(state.controller.snapshot())
}

pub async fn update_filters(
    State(state): State<AppState>,
    Json(req): Json<FiltersRequest>,
) -> Json<ViewSnapshot> {
    state.controller.set_filters(req.search_term, req.risk_filter);
    Json(state.controller.snapshot())
}

/// Submit the form and wait for the verification to finish
///
/// The verification keeps running if the client goes away.
pub async fn submit(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<VerificationRecord>)> {
    let handle = state.controller.submit()?;
    let record = handle.wait().await?;
    Ok((StatusCode::CREATED, Json(record)))
}

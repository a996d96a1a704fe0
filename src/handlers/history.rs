//! History and result handlers

use axum::{extract::{State, Path, Query}, Json};
use serde::{Deserialize, Serialize};

use crate::{AppState, AppResult, AppError};
use crate::models::{HistoryFilter, RiskFilter, VerificationRecord};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub search: Option<String>,
    pub risk: Option<RiskFilter>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub filter: HistoryFilter,
    pub records: Vec<VerificationRecord>,
}

/// Latest result; `null` when nothing has been verified yet
#[derive(Debug, Serialize)]
pub struct LatestResult {
    pub result: Option<VerificationRecord>,
}

/// Filtered history; query parameters override the dashboard's filters
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let mut filter = state.controller.filter();
    if let Some(search) = query.search {
        filter.search_term = search;
    }
    if let Some(risk) = query.risk {
        filter.risk_filter = risk;
    }

    let records = state.controller.filtered_with(&filter);

    Json(HistoryResponse {
        total: state.controller.dashboard_stats().total,
        filter,
        records,
    })
}

/// Get single verification
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<VerificationRecord>> {
    let record = state.controller
        .find(&id)
        .ok_or_else(|| AppError::NotFound("Verification not found".to_string()))?;

    Ok(Json(record))
}

pub async fn latest(State(state): State<AppState>) -> Json<LatestResult> {
    Json(LatestResult {
        result: state.controller.latest_result(),
    })
}

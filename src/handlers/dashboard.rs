//! Dashboard summary handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::controller::RECENT_LIMIT;
use crate::models::{DashboardStats, VerificationRecord};

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent: Vec<VerificationRecord>,
}

/// Counters plus the most recent verifications
pub async fn summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(DashboardSummary {
        stats: state.controller.dashboard_stats(),
        recent: state.controller.recent(RECENT_LIMIT),
    })
}

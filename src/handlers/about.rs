//! About handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use crate::controller::Page;

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub id: Page,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub disclaimer: &'static str,
    pub document_types: [&'static str; 3],
    pub environment: String,
    pub navigation: Vec<NavItem>,
}

pub async fn get(State(state): State<AppState>) -> Json<AboutResponse> {
    Json(AboutResponse {
        name: "KYC Verification Dashboard",
        version: env!("CARGO_PKG_VERSION"),
        description: "Identity verification workflow: submit customer details, \
                      review the outcome, search past verifications.",
        disclaimer: "Fraud probability, risk level, status and detail checks are \
                     randomly generated placeholders. Connect a real verification \
                     service before relying on any result.",
        document_types: ["AADHAR", "PAN", "UTILITY"],
        environment: state.config.environment.clone(),
        navigation: Page::ALL
            .iter()
            .map(|page| NavItem { id: *page, label: page.label() })
            .collect(),
    })
}

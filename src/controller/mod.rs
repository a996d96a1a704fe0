//! Dashboard view controller
//!
//! Holds the page the dashboard shows, its form and filter inputs, the
//! loading flag and the in-memory history, and runs verifications.
//!
//! ```text
//!   dashboard ─┐
//!   upload ────┤  navigate(page)      submit()            task completes
//!   result ────┼──────────────────►  loading = true  ───►  save + reload,
//!   history ───┤                     (handle returned)     page = result
//!   about ─────┘
//! ```

mod page;

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::{oneshot, Mutex};
use uuid::Uuid;

use crate::{AppError, AppResult};
use crate::models::{
    DashboardStats, FormUpdate, HistoryFilter, RiskFilter, VerificationRecord,
    VerificationRequest,
};
use crate::provider::VerificationProvider;
use crate::store::RecordStore;

pub use page::Page;

/// Records shown on the dashboard's recent list
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Default)]
struct ViewState {
    page: Page,
    form: VerificationRequest,
    filter: HistoryFilter,
    loading: bool,
    history: Vec<VerificationRecord>,
}

/// Serializable view of the controller's inputs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub page: Page,
    pub form: VerificationRequest,
    pub search_term: String,
    pub risk_filter: RiskFilter,
    pub loading: bool,
    pub can_submit: bool,
    pub record_count: usize,
}

/// Reply to a file selected for batch upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAck {
    pub upload_id: Uuid,
    pub file_name: String,
    pub message: String,
}

/// Completion signal of a running verification
#[derive(Debug)]
pub struct VerificationHandle {
    rx: oneshot::Receiver<AppResult<VerificationRecord>>,
}

impl VerificationHandle {
    pub async fn wait(self) -> AppResult<VerificationRecord> {
        self.rx
            .await
            .map_err(|_| AppError::InternalError("verification task dropped".to_string()))?
    }
}

#[derive(Clone)]
pub struct ViewController {
    store: Arc<dyn RecordStore>,
    provider: Arc<dyn VerificationProvider>,
    state: Arc<RwLock<ViewState>>,
    /// Held from `load_all` until its result is in `history`
    reload: Arc<Mutex<()>>,
}

impl ViewController {
    pub fn new(store: Arc<dyn RecordStore>, provider: Arc<dyn VerificationProvider>) -> Self {
        Self {
            store,
            provider,
            state: Arc::new(RwLock::new(ViewState::default())),
            reload: Arc::new(Mutex::new(())),
        }
    }

    /// Build and load the existing history
    pub async fn load(store: Arc<dyn RecordStore>, provider: Arc<dyn VerificationProvider>) -> Self {
        let controller = Self::new(store, provider);
        controller.refresh().await;
        controller
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn provider(&self) -> &Arc<dyn VerificationProvider> {
        &self.provider
    }

    /// Reload history from the store
    pub async fn refresh(&self) {
        self.reload_history(|_| {}).await;
    }

    /// Replace history with the store's contents, then apply `finish`
    ///
    /// Reloads run one at a time, so a slow `load_all` can never
    /// overwrite the result of one that started after it.
    async fn reload_history<F>(&self, finish: F)
    where
        F: FnOnce(&mut ViewState) + Send,
    {
        let _serial = self.reload.lock().await;
        let history = self.store.load_all().await;
        tracing::debug!("History loaded: {} records", history.len());

        let mut state = self.state.write();
        state.history = history;
        finish(&mut state);
    }

    pub fn page(&self) -> Page {
        self.state.read().page
    }

    pub fn navigate(&self, page: Page) {
        let mut state = self.state.write();
        if state.page != page {
            tracing::debug!("Page {} -> {}", state.page, page);
            state.page = page;
        }
    }

    pub fn update_form(&self, update: FormUpdate) -> VerificationRequest {
        let mut state = self.state.write();
        update.apply_to(&mut state.form);
        state.form.clone()
    }

    pub fn set_filters(&self, search_term: Option<String>, risk_filter: Option<RiskFilter>) -> HistoryFilter {
        let mut state = self.state.write();
        if let Some(term) = search_term {
            state.filter.search_term = term;
        }
        if let Some(risk) = risk_filter {
            state.filter.risk_filter = risk;
        }
        state.filter.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn can_submit(&self) -> bool {
        let state = self.state.read();
        !state.loading && state.form.is_complete()
    }

    /// Start verifying the current form
    ///
    /// Fails without side effects when the form is incomplete or a
    /// verification is already running. Otherwise the dashboard enters
    /// the loading state until the returned handle resolves; by then the
    /// record is saved, history is reloaded and the page is `result`.
    pub fn submit(&self) -> AppResult<VerificationHandle> {
        let request = {
            let mut state = self.state.write();
            if state.loading {
                return Err(AppError::Busy);
            }
            if !state.form.is_complete() {
                return Err(AppError::ValidationError(
                    "Name and AADHAR number are required".to_string(),
                ));
            }
            state.loading = true;
            state.form.clone()
        };

        let (tx, rx) = oneshot::channel();
        let controller = self.clone();

        tokio::spawn(async move {
            let outcome = controller.run_verification(request).await;
            // Receiver may be gone; the state update already happened
            let _ = tx.send(outcome);
        });

        Ok(VerificationHandle { rx })
    }

    async fn run_verification(&self, request: VerificationRequest) -> AppResult<VerificationRecord> {
        let record = match self.provider.evaluate(&request).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Verification failed: {}", e);
                self.state.write().loading = false;
                return Err(e.into());
            }
        };

        self.store.save(&record).await;
        self.reload_history(|state| {
            state.loading = false;
            state.page = Page::Result;
        })
        .await;

        tracing::info!("Verification completed: {} ({:?})", record.id, record.status);
        Ok(record)
    }

    /// Most recent record, if any
    pub fn latest_result(&self) -> Option<VerificationRecord> {
        self.state.read().history.first().cloned()
    }

    pub fn history(&self) -> Vec<VerificationRecord> {
        self.state.read().history.clone()
    }

    pub fn recent(&self, limit: usize) -> Vec<VerificationRecord> {
        self.state.read().history.iter().take(limit).cloned().collect()
    }

    /// History narrowed by the dashboard's current filters
    pub fn filtered_history(&self) -> Vec<VerificationRecord> {
        let state = self.state.read();
        Self::apply_filter(&state.history, &state.filter)
    }

    /// History narrowed by an explicit filter
    pub fn filtered_with(&self, filter: &HistoryFilter) -> Vec<VerificationRecord> {
        Self::apply_filter(&self.state.read().history, filter)
    }

    pub fn filter(&self) -> HistoryFilter {
        self.state.read().filter.clone()
    }

    fn apply_filter(history: &[VerificationRecord], filter: &HistoryFilter) -> Vec<VerificationRecord> {
        filter.apply(history).into_iter().cloned().collect()
    }

    pub fn find(&self, id: &str) -> Option<VerificationRecord> {
        self.state.read().history.iter().find(|r| r.id == id).cloned()
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::from_records(&self.state.read().history)
    }

    /// Placeholder for batch upload: nothing is parsed or stored
    pub fn acknowledge_upload(&self, file_name: &str) -> AppResult<UploadAck> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(AppError::ValidationError("File name is required".to_string()));
        }
        if !file_name.to_ascii_lowercase().ends_with(".csv") {
            return Err(AppError::ValidationError("Only .csv files are accepted".to_string()));
        }

        let ack = UploadAck {
            upload_id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            message: format!(
                "File {} ready for upload. Connect to backend API for processing.",
                file_name
            ),
        };
        tracing::info!("Upload acknowledged: {} ({})", ack.file_name, ack.upload_id);
        Ok(ack)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.read();
        ViewSnapshot {
            page: state.page,
            form: state.form.clone(),
            search_term: state.filter.search_term.clone(),
            risk_filter: state.filter.risk_filter,
            loading: state.loading,
            can_submit: !state.loading && state.form.is_complete(),
            record_count: state.history.len(),
        }
    }
}

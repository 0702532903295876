//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model, the store client and the view. It is
//! organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `search`: Search session lifecycle, pagination and cancellation
//! - `modals`: Version history and download-link fetches

mod input;
mod modals;
pub mod search;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{AppDetail, AppModel, AppSummary, StoreApi};
use search::{ErrorScope, RenderSink, SearchController};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) api: Arc<dyn StoreApi>,
    pub(crate) search: SearchController,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>, api: Arc<dyn StoreApi>) -> Self {
        let sink = Arc::new(ModelRenderSink {
            model: model.clone(),
        });
        let search = SearchController::new(api.clone(), sink);
        Self { model, api, search }
    }

    /// Explicit reset: clears the query, the rendered results and the active
    /// session.
    pub async fn clear_search(&self) {
        self.search.reset().await;
        let model = self.model.lock().await;
        model.clear_search_query().await;
        model.clear_results().await;
    }
}

/// Applies render-sink events to the shared content state.
struct ModelRenderSink {
    model: Arc<Mutex<AppModel>>,
}

#[async_trait]
impl RenderSink for ModelRenderSink {
    async fn on_page_start(&self, is_first_page: bool) {
        let model = self.model.lock().await;
        model.begin_page(is_first_page).await;
    }

    async fn on_item_ready(&self, detail: AppDetail, summary: AppSummary) {
        let model = self.model.lock().await;
        model.push_card(detail, summary).await;
    }

    async fn on_page_end(&self, exhausted: bool, empty: bool) {
        let model = self.model.lock().await;
        model.end_page(exhausted, empty).await;
    }

    async fn on_error(&self, scope: ErrorScope, message: String) {
        let model = self.model.lock().await;
        match scope {
            ErrorScope::Initial => model.show_search_error(message).await,
            // Continuation failures leave existing results visible; only the
            // loading indicator goes away.
            ErrorScope::Continuation => model.stop_loading().await,
        }
    }
}

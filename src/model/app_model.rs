//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::content::{AppCard, AppDetail, AppSummary, ContentState, DownloadInfo, VersionEntry};
use super::types::{ActiveModal, ActiveSection, UiState};

/// How close to the end of the list the selection may get before the next
/// page is requested.
pub const LOAD_MORE_THRESHOLD: usize = 3;

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Search input
    // ========================================================================

    pub async fn append_to_search(&self, c: char) -> String {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
        state.search_query.clone()
    }

    pub async fn backspace_search(&self) -> String {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
        state.search_query.clone()
    }

    pub async fn clear_search_query(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.clear();
        state.active_section = ActiveSection::Search;
    }

    pub async fn toggle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.toggle();
    }

    pub async fn focus_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = ActiveSection::Search;
    }

    // ========================================================================
    // Results
    // ========================================================================

    pub async fn clear_results(&self) {
        *self.content_state.lock().await = ContentState::default();
    }

    pub async fn move_selection_up(&self) {
        let mut content = self.content_state.lock().await;
        if content.selected > 0 {
            content.selected -= 1;
        }
    }

    pub async fn move_selection_down(&self) {
        let mut content = self.content_state.lock().await;
        if content.selected + 1 < content.cards.len() {
            content.selected += 1;
        }
    }

    /// Scroll-proximity check for the load-more trigger.
    pub async fn near_end_of_results(&self) -> bool {
        let content = self.content_state.lock().await;
        !content.cards.is_empty() && content.selected + LOAD_MORE_THRESHOLD >= content.cards.len()
    }

    pub async fn selected_card(&self) -> Option<AppCard> {
        let content = self.content_state.lock().await;
        content.cards.get(content.selected).cloned()
    }

    // ========================================================================
    // Render-sink mutations
    // ========================================================================

    pub async fn begin_page(&self, is_first_page: bool) {
        let mut content = self.content_state.lock().await;
        if is_first_page {
            content.cards.clear();
            content.selected = 0;
            content.error = None;
            content.no_results = false;
            content.exhausted = false;
        }
        content.is_loading = true;
    }

    pub async fn push_card(&self, detail: AppDetail, summary: AppSummary) {
        let mut content = self.content_state.lock().await;
        content.cards.push(AppCard { detail, summary });
    }

    pub async fn end_page(&self, exhausted: bool, empty: bool) {
        let mut content = self.content_state.lock().await;
        content.is_loading = false;
        content.exhausted = exhausted;
        if empty && content.cards.is_empty() {
            content.no_results = true;
        }
    }

    pub async fn show_search_error(&self, message: String) {
        let mut content = self.content_state.lock().await;
        content.cards.clear();
        content.selected = 0;
        content.no_results = false;
        content.is_loading = false;
        content.error = Some(message);
    }

    pub async fn stop_loading(&self) {
        let mut content = self.content_state.lock().await;
        content.is_loading = false;
    }

    // ========================================================================
    // Modals
    // ========================================================================

    pub async fn has_modal(&self) -> bool {
        self.ui_state.lock().await.modal.is_some()
    }

    pub async fn close_modal(&self) {
        self.ui_state.lock().await.modal = None;
    }

    pub async fn show_help(&self) {
        self.ui_state.lock().await.modal = Some(ActiveModal::Help);
    }

    pub async fn scroll_modal(&self, delta: i16) {
        let mut state = self.ui_state.lock().await;
        let scroll = match state.modal.as_mut() {
            Some(ActiveModal::VersionHistory { scroll, .. }) => scroll,
            Some(ActiveModal::Download { scroll, .. }) => scroll,
            _ => return,
        };
        *scroll = scroll.saturating_add_signed(delta);
    }

    pub async fn open_version_history(&self, app_name: String) {
        self.ui_state.lock().await.modal = Some(ActiveModal::VersionHistory {
            app_name,
            entries: None,
            error: None,
            scroll: 0,
        });
    }

    /// Fill the version-history modal, unless the user has moved on to a
    /// different modal in the meantime.
    pub async fn set_version_history(&self, app_name: &str, result: Vec<VersionEntry>) {
        let mut state = self.ui_state.lock().await;
        if let Some(ActiveModal::VersionHistory {
            app_name: open_name,
            entries,
            ..
        }) = state.modal.as_mut()
        {
            if open_name == app_name {
                *entries = Some(result);
            }
        }
    }

    pub async fn set_version_history_error(&self, app_name: &str, message: String) {
        let mut state = self.ui_state.lock().await;
        if let Some(ActiveModal::VersionHistory {
            app_name: open_name,
            error,
            ..
        }) = state.modal.as_mut()
        {
            if open_name == app_name {
                *error = Some(message);
            }
        }
    }

    pub async fn open_download(&self, app_name: String) {
        self.ui_state.lock().await.modal = Some(ActiveModal::Download {
            app_name,
            info: None,
            error: None,
            scroll: 0,
        });
    }

    pub async fn set_download(&self, app_name: &str, result: DownloadInfo) {
        let mut state = self.ui_state.lock().await;
        if let Some(ActiveModal::Download {
            app_name: open_name,
            info,
            ..
        }) = state.modal.as_mut()
        {
            if open_name == app_name {
                *info = Some(result);
            }
        }
    }

    pub async fn set_download_error(&self, app_name: &str, message: String) {
        let mut state = self.ui_state.lock().await;
        if let Some(ActiveModal::Download {
            app_name: open_name,
            error,
            ..
        }) = state.modal.as_mut()
        {
            if open_name == app_name {
                *error = Some(message);
            }
        }
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

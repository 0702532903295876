//! Incremental search and pagination controller.
//!
//! Owns query identity, the page cursor and the cancellation token of the
//! current search session. Starting a new session cancels and supersedes the
//! previous one; every asynchronous continuation re-checks that its session
//! is still the current one after each suspension point and exits silently
//! when it is not, so a superseded session can never deliver stale results.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::model::{
    AppDetail, AppSummary, CancellationToken, SearchSession, StoreApi, StoreError,
};

/// Interval within which rapid query submissions coalesce.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Where a reportable failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorScope {
    /// First page of a fresh session; the collaborator shows an error panel.
    Initial,
    /// A later page; the collaborator leaves existing results visible.
    Continuation,
}

/// Consumer interface for rendered output.
///
/// `on_item_ready` calls arrive strictly in the order the backend returned
/// the summaries, and only while the originating session is current.
#[async_trait]
pub trait RenderSink: Send + Sync {
    async fn on_page_start(&self, is_first_page: bool);
    async fn on_item_ready(&self, detail: AppDetail, summary: AppSummary);
    async fn on_page_end(&self, exhausted: bool, empty: bool);
    async fn on_error(&self, scope: ErrorScope, message: String);
}

#[derive(Default)]
struct SessionState {
    next_id: u64,
    /// Generation counter for pending debounced submissions; only the newest
    /// generation may start a session when its timer fires.
    submit_gen: u64,
    current: Option<SearchSession>,
}

/// The search session controller.
#[derive(Clone)]
pub struct SearchController {
    api: Arc<dyn StoreApi>,
    sink: Arc<dyn RenderSink>,
    state: Arc<Mutex<SessionState>>,
    debounce: Duration,
}

impl SearchController {
    pub fn new(api: Arc<dyn StoreApi>, sink: Arc<dyn RenderSink>) -> Self {
        Self::with_debounce(api, sink, DEBOUNCE)
    }

    pub fn with_debounce(
        api: Arc<dyn StoreApi>,
        sink: Arc<dyn RenderSink>,
        debounce: Duration,
    ) -> Self {
        Self {
            api,
            sink,
            state: Arc::new(Mutex::new(SessionState::default())),
            debounce,
        }
    }

    /// Debounced query submission: of several rapid calls only the last
    /// argument triggers a fetch. Whitespace-only input is a no-op and does
    /// not disturb whatever session is in flight.
    pub async fn submit_query(&self, text: &str) {
        let query = text.trim().to_string();
        if query.is_empty() {
            return;
        }
        let generation = {
            let mut state = self.state.lock().await;
            state.submit_gen += 1;
            state.submit_gen
        };
        let controller = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(controller.debounce).await;
            controller.start_session(query, generation).await;
        });
    }

    /// Immediate submission (Enter). Also invalidates any pending debounced
    /// submission so older text cannot resurface later.
    pub async fn submit_now(&self, text: &str) {
        let query = text.trim().to_string();
        if query.is_empty() {
            return;
        }
        let generation = {
            let mut state = self.state.lock().await;
            state.submit_gen += 1;
            state.submit_gen
        };
        self.start_session(query, generation).await;
    }

    /// Fetch the next page of the current session. No-op while a fetch is in
    /// flight, after exhaustion, or without an active query.
    pub async fn load_more(&self) {
        let (id, query, token, page) = {
            let mut state = self.state.lock().await;
            let Some(session) = state.current.as_mut() else {
                return;
            };
            if session.loading || session.exhausted {
                return;
            }
            session.loading = true;
            (
                session.id,
                session.query.clone(),
                session.token.clone(),
                session.page,
            )
        };
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_page(id, query, token, page, false).await;
        });
    }

    /// Cancel and drop the current session and any pending debounced
    /// submission. Idempotent. Rendered output is left to the caller.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.submit_gen += 1;
        if let Some(session) = state.current.take() {
            tracing::debug!(query = %session.query, "Session reset");
            session.token.cancel();
        }
    }

    /// Snapshot of the current session, for status display.
    pub async fn current_session(&self) -> Option<SearchSession> {
        self.state.lock().await.current.clone()
    }

    async fn start_session(&self, query: String, generation: u64) {
        let (id, token) = {
            let mut state = self.state.lock().await;
            // The generation check and the session install must share one
            // lock hold: a newer submission or a reset in between must win,
            // never be superseded by older text firing late.
            if state.submit_gen != generation {
                tracing::debug!(query = %query, "Stale submission dropped");
                return;
            }
            if let Some(old) = state.current.take() {
                tracing::debug!(old = %old.query, new = %query, "Superseding session");
                old.token.cancel();
            }
            state.next_id += 1;
            let mut session = SearchSession::new(state.next_id, query.clone());
            session.loading = true;
            let id = session.id;
            let token = session.token.clone();
            state.current = Some(session);
            (id, token)
        };
        let controller = self.clone();
        tokio::spawn(async move {
            controller.fetch_page(id, query, token, 0, true).await;
        });
    }

    async fn is_current(&self, id: u64) -> bool {
        self.state
            .lock()
            .await
            .current
            .as_ref()
            .is_some_and(|s| s.id == id)
    }

    /// Fetch one page and resolve its details sequentially.
    async fn fetch_page(
        &self,
        id: u64,
        query: String,
        token: CancellationToken,
        page: u32,
        is_first: bool,
    ) {
        tracing::debug!(query = %query, page, is_first, "Fetching page");
        let result = self.api.search(&query, page, &token).await;

        if token.is_cancelled() || !self.is_current(id).await {
            return;
        }

        let response = match result {
            Ok(response) => response,
            Err(StoreError::Cancelled) => return,
            Err(error) => {
                self.fail_page(id, is_first, error).await;
                return;
            }
        };

        self.sink.on_page_start(is_first).await;

        if response.items.is_empty() {
            tracing::info!(query = %query, page, "Empty page, session exhausted");
            self.finish_page(id, page, 0).await;
            self.sink.on_page_end(true, is_first).await;
            return;
        }

        for summary in response.items {
            if token.is_cancelled() || !self.is_current(id).await {
                tracing::debug!(query = %query, "Superseded mid-page, leaving partial output");
                return;
            }
            match self.api.app_details(&summary.package_name, &token).await {
                Ok(Some(detail)) => {
                    if token.is_cancelled() || !self.is_current(id).await {
                        return;
                    }
                    self.sink.on_item_ready(detail, summary).await;
                }
                Ok(None) => {
                    tracing::debug!(package = %summary.package_name, "No detail available, skipping");
                }
                Err(StoreError::Cancelled) => return,
                Err(error) => {
                    // A failed detail skips that card only, as in the web UI.
                    tracing::warn!(package = %summary.package_name, error = %error, "Detail fetch failed");
                }
            }
        }

        let exhausted = self.finish_page(id, page, response.total_pages).await;
        self.sink.on_page_end(exhausted, false).await;
    }

    /// Record a consumed page. Exhaustion is judged against the page just
    /// consumed, then the cursor advances, so a total-page count that changes
    /// between requests cannot skip or repeat a page.
    async fn finish_page(&self, id: u64, page: u32, total_pages: u32) -> bool {
        let exhausted = page + 1 >= total_pages;
        let mut state = self.state.lock().await;
        if let Some(session) = state.current.as_mut() {
            if session.id == id {
                session.exhausted = exhausted;
                session.page = page + 1;
                session.loading = false;
            }
        }
        exhausted
    }

    async fn fail_page(&self, id: u64, is_first: bool, error: StoreError) {
        {
            let mut state = self.state.lock().await;
            if let Some(session) = state.current.as_mut() {
                if session.id == id {
                    session.loading = false;
                    if !is_first {
                        // A failing continuation page ends the session rather
                        // than being re-requested forever by the scroll
                        // trigger.
                        session.exhausted = true;
                    }
                }
            }
        }
        if is_first {
            tracing::error!(error = %error, "Initial search page failed");
            if self.is_current(id).await {
                self.sink
                    .on_error(
                        ErrorScope::Initial,
                        "Unable to connect to the server".to_string(),
                    )
                    .await;
            }
        } else {
            tracing::warn!(error = %error, "Continuation page failed, stopping pagination");
            self.sink
                .on_error(ErrorScope::Continuation, error.to_string())
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;
    use tokio::time::{self, Duration};

    use crate::model::{DownloadInfo, SearchPage, VersionEntry};

    #[derive(Clone, Debug, PartialEq)]
    enum SinkEvent {
        PageStart(bool),
        Item(String),
        PageEnd { exhausted: bool, empty: bool },
        Error(ErrorScope),
    }

    #[derive(Default)]
    struct RecordingSink {
        events: StdMutex<Vec<SinkEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<SinkEvent> {
            self.events.lock().unwrap().clone()
        }

        fn items(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    SinkEvent::Item(package) => Some(package),
                    _ => None,
                })
                .collect()
        }

        fn errors(&self) -> Vec<ErrorScope> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    SinkEvent::Error(scope) => Some(scope),
                    _ => None,
                })
                .collect()
        }

        fn page_ends(&self) -> Vec<(bool, bool)> {
            self.events()
                .into_iter()
                .filter_map(|e| match e {
                    SinkEvent::PageEnd { exhausted, empty } => Some((exhausted, empty)),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl RenderSink for RecordingSink {
        async fn on_page_start(&self, is_first_page: bool) {
            self.events
                .lock()
                .unwrap()
                .push(SinkEvent::PageStart(is_first_page));
        }

        async fn on_item_ready(&self, _detail: AppDetail, summary: AppSummary) {
            self.events
                .lock()
                .unwrap()
                .push(SinkEvent::Item(summary.package_name));
        }

        async fn on_page_end(&self, exhausted: bool, empty: bool) {
            self.events
                .lock()
                .unwrap()
                .push(SinkEvent::PageEnd { exhausted, empty });
        }

        async fn on_error(&self, scope: ErrorScope, _message: String) {
            self.events.lock().unwrap().push(SinkEvent::Error(scope));
        }
    }

    fn summary(package: &str) -> AppSummary {
        AppSummary {
            package_name: package.to_string(),
            app_name: package.to_string(),
            ..Default::default()
        }
    }

    fn page(total_pages: u32, packages: &[&str]) -> SearchPage {
        SearchPage {
            items: packages.iter().map(|p| summary(p)).collect(),
            total_pages,
        }
    }

    /// Scripted backend. Delays use the (paused) tokio clock and deliberately
    /// ignore the token, so the controller's post-suspension staleness checks
    /// get exercised rather than short-circuited by `select!`.
    #[derive(Default)]
    struct ScriptedApi {
        pages: HashMap<(String, u32), Result<SearchPage, StoreError>>,
        details: HashMap<String, Result<Option<AppDetail>, StoreError>>,
        search_delays: HashMap<String, u64>,
        detail_delay_ms: u64,
        search_calls: StdMutex<Vec<(String, u32)>>,
        detail_calls: StdMutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn with_page(mut self, query: &str, page_no: u32, result: SearchPage) -> Self {
            self.pages.insert((query.to_string(), page_no), Ok(result));
            self
        }

        fn with_failure(mut self, query: &str, page_no: u32) -> Self {
            self.pages.insert(
                (query.to_string(), page_no),
                Err(StoreError::Transport("connection refused".to_string())),
            );
            self
        }

        fn with_detail_missing(mut self, package: &str) -> Self {
            self.details.insert(package.to_string(), Ok(None));
            self
        }

        fn with_detail_failure(mut self, package: &str) -> Self {
            self.details.insert(
                package.to_string(),
                Err(StoreError::Transport("detail unavailable".to_string())),
            );
            self
        }

        fn with_search_delay(mut self, query: &str, millis: u64) -> Self {
            self.search_delays.insert(query.to_string(), millis);
            self
        }

        fn with_detail_delay(mut self, millis: u64) -> Self {
            self.detail_delay_ms = millis;
            self
        }

        fn search_calls(&self) -> Vec<(String, u32)> {
            self.search_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StoreApi for ScriptedApi {
        async fn search(
            &self,
            query: &str,
            page: u32,
            _token: &CancellationToken,
        ) -> Result<SearchPage, StoreError> {
            self.search_calls
                .lock()
                .unwrap()
                .push((query.to_string(), page));
            if let Some(millis) = self.search_delays.get(query) {
                time::sleep(Duration::from_millis(*millis)).await;
            }
            match self.pages.get(&(query.to_string(), page)) {
                Some(result) => result.clone(),
                None => Err(StoreError::Transport("unscripted request".to_string())),
            }
        }

        async fn app_details(
            &self,
            package_name: &str,
            _token: &CancellationToken,
        ) -> Result<Option<AppDetail>, StoreError> {
            self.detail_calls
                .lock()
                .unwrap()
                .push(package_name.to_string());
            if self.detail_delay_ms > 0 {
                time::sleep(Duration::from_millis(self.detail_delay_ms)).await;
            }
            if let Some(outcome) = self.details.get(package_name) {
                return outcome.clone();
            }
            Ok(Some(AppDetail {
                app_name: package_name.to_string(),
                package_name: package_name.to_string(),
                ..Default::default()
            }))
        }

        async fn version_history(&self, _app_id: u64) -> Result<Vec<VersionEntry>, StoreError> {
            Ok(vec![])
        }

        async fn download_link(&self, _app_id: u64) -> Result<Option<DownloadInfo>, StoreError> {
            Ok(None)
        }
    }

    fn controller(api: Arc<ScriptedApi>, sink: Arc<RecordingSink>) -> SearchController {
        SearchController::with_debounce(api, sink, Duration::from_millis(500))
    }

    /// Let spawned tasks run without moving the clock.
    async fn settle() {
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_query_is_noop() {
        let api = Arc::new(ScriptedApi::default());
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_query("   ").await;
        controller.submit_now("\t").await;
        time::advance(Duration::from_millis(600)).await;
        settle().await;

        assert!(api.search_calls().is_empty());
        assert!(sink.events().is_empty());
        assert!(controller.current_session().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_rapid_submits() {
        let api = Arc::new(
            ScriptedApi::default().with_page("cal", 0, page(1, &["ru.app.cal"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_query("c").await;
        controller.submit_query("ca").await;
        controller.submit_query("cal").await;
        // let the debounce timers register before the clock moves
        settle().await;
        time::advance(Duration::from_millis(600)).await;
        settle().await;

        assert_eq!(api.search_calls(), vec![("cal".to_string(), 0)]);
        assert_eq!(sink.items(), vec!["ru.app.cal"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_now_flushes_pending_debounce() {
        let api = Arc::new(
            ScriptedApi::default().with_page("calc", 0, page(1, &["ru.app.calc"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_query("cal").await;
        settle().await;
        controller.submit_now("calc").await;
        time::advance(Duration::from_millis(600)).await;
        settle().await;

        // the debounced "cal" timer fired into a stale generation
        assert_eq!(api.search_calls(), vec![("calc".to_string(), 0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_never_supersedes_newer_query() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_page("old", 0, page(1, &["ru.old"]))
                .with_page("new", 0, page(1, &["ru.new"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("new").await;
        settle().await;

        // a debounce timer pending from before "new" fires late, carrying an
        // outdated generation; it must not replace the newer session
        controller.start_session("old".to_string(), 0).await;
        settle().await;

        assert_eq!(api.search_calls(), vec![("new".to_string(), 0)]);
        assert_eq!(controller.current_session().await.unwrap().query, "new");
        assert_eq!(sink.items(), vec!["ru.new"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_page_renders_and_exhausts() {
        let api = Arc::new(
            ScriptedApi::default().with_page("calc", 0, page(1, &["ru.a", "ru.b"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("calc").await;
        settle().await;

        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::PageStart(true),
                SinkEvent::Item("ru.a".to_string()),
                SinkEvent::Item("ru.b".to_string()),
                SinkEvent::PageEnd {
                    exhausted: true,
                    empty: false
                },
            ]
        );

        // exhausted: further load_more must not issue a fetch
        controller.load_more().await;
        settle().await;
        assert_eq!(api.search_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_or_missing_detail_skips_that_card_only() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_page("q", 0, page(1, &["ru.a", "ru.broken", "ru.gone", "ru.d"]))
                .with_detail_failure("ru.broken")
                .with_detail_missing("ru.gone"),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("q").await;
        settle().await;

        // the bad detail fetches skip their cards; neighbours still render
        assert_eq!(sink.items(), vec!["ru.a", "ru.d"]);
        assert_eq!(sink.page_ends(), vec![(true, false)]);
        assert!(sink.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_first_page_reports_no_results() {
        let api = Arc::new(
            ScriptedApi::default().with_page("zzz-nonexistent", 0, page(0, &[])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("zzz-nonexistent").await;
        settle().await;

        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::PageStart(true),
                SinkEvent::PageEnd {
                    exhausted: true,
                    empty: true
                },
            ]
        );
        assert!(sink.errors().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pagination_is_monotonic_and_exhausts() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_page("q", 0, page(3, &["ru.p0"]))
                .with_page("q", 1, page(3, &["ru.p1"]))
                .with_page("q", 2, page(3, &["ru.p2"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("q").await;
        settle().await;
        controller.load_more().await;
        settle().await;
        controller.load_more().await;
        settle().await;
        // exhausted now; extra calls are no-ops
        controller.load_more().await;
        controller.load_more().await;
        settle().await;

        assert_eq!(
            api.search_calls(),
            vec![
                ("q".to_string(), 0),
                ("q".to_string(), 1),
                ("q".to_string(), 2)
            ]
        );
        assert_eq!(
            sink.page_ends(),
            vec![(false, false), (false, false), (true, false)]
        );
        assert_eq!(sink.items(), vec!["ru.p0", "ru.p1", "ru.p2"]);

        let session = controller.current_session().await.unwrap();
        assert_eq!(session.page, 3);
        assert!(session.exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_is_noop_while_loading() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_search_delay("slow", 1000)
                .with_page("slow", 0, page(2, &["ru.s0"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("slow").await;
        settle().await;
        // first page still in flight
        controller.load_more().await;
        settle().await;
        time::advance(Duration::from_millis(1100)).await;
        settle().await;

        assert_eq!(api.search_calls(), vec![("slow".to_string(), 0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_query_never_renders() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_search_delay("x", 1000)
                .with_page("x", 0, page(1, &["ru.stale"]))
                .with_page("y", 0, page(1, &["ru.fresh"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("x").await;
        settle().await;
        controller.submit_now("y").await;
        settle().await;
        // let x's response finally arrive
        time::advance(Duration::from_millis(1100)).await;
        settle().await;

        assert_eq!(sink.items(), vec!["ru.fresh"]);
        // both requests were issued; only the current one rendered
        assert_eq!(
            api.search_calls(),
            vec![("x".to_string(), 0), ("y".to_string(), 0)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_mid_page_leaves_partial_output() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_detail_delay(100)
                .with_page("old", 0, page(1, &["ru.one", "ru.two", "ru.three"]))
                .with_page("new", 0, page(1, &[])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("old").await;
        settle().await;
        // first detail resolves, second is in flight
        time::advance(Duration::from_millis(150)).await;
        settle().await;
        controller.submit_now("new").await;
        settle().await;
        time::advance(Duration::from_millis(1000)).await;
        settle().await;

        // partial page: exactly one of old's items rendered, none after "new"
        assert_eq!(sink.items(), vec!["ru.one"]);
        let ends = sink.page_ends();
        assert_eq!(ends.last(), Some(&(true, true)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_failure_surfaces_error_panel() {
        let api = Arc::new(ScriptedApi::default().with_failure("boom", 0));
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("boom").await;
        settle().await;

        assert_eq!(sink.errors(), vec![ErrorScope::Initial]);
        assert!(sink.items().is_empty());
        assert!(sink.page_ends().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_continuation_failure_is_silent_and_terminal() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_page("q", 0, page(5, &["ru.ok"]))
                .with_failure("q", 1),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("q").await;
        settle().await;
        controller.load_more().await;
        settle().await;

        // no initial-scope error, earlier results untouched
        assert_eq!(sink.errors(), vec![ErrorScope::Continuation]);
        assert_eq!(sink.items(), vec!["ru.ok"]);

        // the failing page is not re-requested by further load_more calls
        controller.load_more().await;
        settle().await;
        assert_eq!(api.search_calls().len(), 2);
        assert!(controller.current_session().await.unwrap().exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_initial_failure_shows_no_panel() {
        let api = Arc::new(
            ScriptedApi::default()
                .with_search_delay("bad", 1000)
                .with_failure("bad", 0)
                .with_page("good", 0, page(1, &["ru.good"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("bad").await;
        settle().await;
        controller.submit_now("good").await;
        settle().await;
        time::advance(Duration::from_millis(1100)).await;
        settle().await;

        // the superseded session's failure must not replace good's results
        assert!(sink.errors().is_empty());
        assert_eq!(sink.items(), vec!["ru.good"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_is_idempotent() {
        let api = Arc::new(
            ScriptedApi::default().with_page("q", 0, page(2, &["ru.q"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_now("q").await;
        settle().await;

        controller.reset().await;
        controller.reset().await;

        assert!(controller.current_session().await.is_none());
        assert!(sink.errors().is_empty());

        // no session: load_more is a no-op
        controller.load_more().await;
        settle().await;
        assert_eq!(api.search_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_debounce() {
        let api = Arc::new(
            ScriptedApi::default().with_page("q", 0, page(1, &["ru.q"])),
        );
        let sink = Arc::new(RecordingSink::default());
        let controller = controller(api.clone(), sink.clone());

        controller.submit_query("q").await;
        settle().await;
        controller.reset().await;
        time::advance(Duration::from_millis(600)).await;
        settle().await;

        assert!(api.search_calls().is_empty());
        assert!(sink.events().is_empty());
    }
}

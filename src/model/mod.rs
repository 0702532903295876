//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (sections, modal state, UI state)
//! - `content`: Catalog data types and the results view state
//! - `session`: Search session identity and cooperative cancellation
//! - `store_client`: RuStore API client
//! - `app_model`: Main application model with state management methods

mod app_model;
mod content;
mod session;
mod store_client;
mod types;

// Re-export all public types for convenient access
pub use types::{ActiveModal, ActiveSection, UiState};

pub use content::{
    AppCard, AppDetail, AppSummary, ContentState, DownloadInfo, ScreenshotUrl, SearchPage,
    VersionEntry,
};

pub use session::{CancellationToken, SearchSession};

pub use store_client::{StoreApi, StoreClient, StoreError, DEFAULT_BASE_URL, PAGE_SIZE};

pub use app_model::AppModel;

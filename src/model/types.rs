//! Core type definitions for the application

use super::content::{DownloadInfo, VersionEntry};

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Results,
}

impl ActiveSection {
    pub fn toggle(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Results,
            ActiveSection::Results => ActiveSection::Search,
        }
    }
}

/// Modal overlay currently shown, if any.
///
/// `entries`/`info` being `None` with no error means the fetch is still in
/// flight and the modal shows a loading placeholder.
#[derive(Clone, Debug)]
pub enum ActiveModal {
    VersionHistory {
        app_name: String,
        entries: Option<Vec<VersionEntry>>,
        error: Option<String>,
        scroll: u16,
    },
    Download {
        app_name: String,
        info: Option<DownloadInfo>,
        error: Option<String>,
        scroll: u16,
    },
    Help,
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub modal: Option<ActiveModal>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            search_query: String::new(),
            modal: None,
        }
    }
}

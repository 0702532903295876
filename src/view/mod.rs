//! Terminal rendering.
//!
//! The view is stateless: each frame it draws the current snapshots of
//! [`UiState`] and [`ContentState`] taken by the main loop.

mod content;
mod layout;
mod overlays;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ui_state: &UiState, content_state: &ContentState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        layout::render_search_bar(frame, chunks[0], ui_state);
        content::render_results(frame, chunks[1], ui_state, content_state);
        layout::render_status_line(frame, chunks[2], ui_state, content_state);

        if let Some(modal) = &ui_state.modal {
            overlays::render_modal(frame, modal);
        }
    }
}

//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Modal handling blocks all other interactions
        if model.has_modal().await {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
                    model.close_modal().await;
                }
                KeyCode::Up => model.scroll_modal(-1).await,
                KeyCode::Down => model.scroll_modal(1).await,
                _ => {}
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Search section: keystrokes edit the query and resubmit it
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Down => {
                    model.toggle_section().await;
                }
                KeyCode::Enter => {
                    let query = ui_state.search_query.clone();
                    drop(model);
                    self.search.submit_now(&query).await;
                }
                KeyCode::Esc => {
                    drop(model);
                    self.clear_search().await;
                }
                KeyCode::Backspace => {
                    let query = model.backspace_search().await;
                    drop(model);
                    self.search.submit_query(&query).await;
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    let query = model.append_to_search(c).await;
                    drop(model);
                    self.search.submit_query(&query).await;
                }
                _ => {}
            }
            return Ok(());
        }

        // Results section
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.toggle_section().await;
            }
            KeyCode::Up => {
                model.move_selection_up().await;
            }
            KeyCode::Down => {
                model.move_selection_down().await;
                // Scroll-proximity trigger: fetch the next page once the
                // selection nears the end of the list.
                if model.near_end_of_results().await {
                    drop(model);
                    self.search.load_more().await;
                }
            }
            KeyCode::Enter => {
                if let Some(card) = model.selected_card().await {
                    drop(model);
                    self.show_version_history(card.detail.app_id, card.detail.app_name)
                        .await;
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(card) = model.selected_card().await {
                    drop(model);
                    self.request_download_link(card.detail.app_id, card.detail.app_name)
                        .await;
                }
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help().await;
            }
            KeyCode::Char('/') | KeyCode::Esc => {
                model.focus_search().await;
            }
            _ => {}
        }
        Ok(())
    }
}

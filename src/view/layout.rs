//! Layout rendering (search bar, status line)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, ContentState, UiState};

pub fn render_search_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let focused = ui_state.active_section == ActiveSection::Search;
    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = if ui_state.search_query.is_empty() && !focused {
        Line::from(Span::styled(
            "Type to search the RuStore catalog",
            Style::default().fg(Color::DarkGray),
        ))
    } else if focused {
        Line::from(vec![
            Span::raw(ui_state.search_query.clone()),
            Span::styled("█", Style::default().fg(Color::Green)),
        ])
    } else {
        Line::from(Span::raw(ui_state.search_query.clone()))
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(border_style),
    );
    frame.render_widget(search, area);
}

pub fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let status = if content_state.is_loading {
        "Searching...".to_string()
    } else if content_state.exhausted && !content_state.cards.is_empty() {
        format!("{} apps (end of results)", content_state.cards.len())
    } else if !content_state.cards.is_empty() {
        format!("{} apps", content_state.cards.len())
    } else {
        String::new()
    };

    let hints = if ui_state.modal.is_some() {
        "↑/↓ scroll | Esc close"
    } else {
        match ui_state.active_section {
            ActiveSection::Search => "Enter search | Esc clear | Tab results | Ctrl-Q quit",
            ActiveSection::Results => {
                "↑/↓ select | Enter versions | d download | h help | / search | q quit"
            }
        }
    };

    let line = Line::from(vec![
        Span::styled(status, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

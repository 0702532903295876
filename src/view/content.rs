//! Main content area rendering (results list and app detail pane)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, AppCard, ContentState, UiState};

use super::utils;

pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    // Initial-page failure replaces the whole results area
    if let Some(error) = &content_state.error {
        let panel = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Please check your internet connection and try again",
                Style::default().fg(Color::Red),
            )),
        ])
        .centered()
        .block(Block::default().borders(Borders::ALL).title(" Results "));
        frame.render_widget(panel, area);
        return;
    }

    if content_state.cards.is_empty() {
        let message = if content_state.no_results {
            "No apps found"
        } else if content_state.is_loading {
            "Searching..."
        } else {
            "Results will appear here"
        };
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::DarkGray))),
        ])
        .centered()
        .block(Block::default().borders(Borders::ALL).title(" Results "));
        frame.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_result_list(frame, chunks[0], ui_state, content_state);

    if let Some(card) = content_state.cards.get(content_state.selected) {
        render_detail_pane(frame, chunks[1], card);
    }
}

fn render_result_list(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let focused = ui_state.active_section == ActiveSection::Results;
    let name_width = (area.width as usize).saturating_sub(12).max(8);

    let items: Vec<ListItem> = content_state
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let selected = i == content_state.selected;
            let style = if selected && focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(
                    utils::truncate_string(&card.detail.app_name, name_width),
                    style,
                ),
                Span::styled(
                    format!(" ★{:.1}", card.summary.average_user_rating),
                    Style::default().fg(Color::Yellow),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if content_state.is_loading {
        " Results (loading...) "
    } else {
        " Results "
    };

    utils::render_scrollable_list(
        frame,
        area,
        items,
        content_state.selected,
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
}

fn render_detail_pane(frame: &mut Frame, area: Rect, card: &AppCard) {
    let detail = &card.detail;
    let summary = &card.summary;

    let mut lines = vec![
        Line::from(Span::styled(
            detail.app_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            detail.package_name.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::styled(
                utils::rating_stars(summary.average_user_rating),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(
                " {} ({})",
                utils::round_rating(summary.average_user_rating),
                utils::format_count(summary.total_ratings)
            )),
        ]),
        Line::from(""),
    ];

    if !detail.short_description.is_empty() {
        lines.push(Line::from(detail.short_description.clone()));
        lines.push(Line::from(""));
    }

    let meta = [
        ("App ID", detail.app_id.to_string()),
        ("Version", detail.version_name.clone()),
        ("Version Code", detail.version_code.to_string()),
        ("Size", format!("~{}", utils::format_file_size(detail.file_size))),
        ("Min SDK", utils::android_version(detail.min_sdk_version)),
        ("Downloads", utils::format_count(detail.downloads)),
        ("Updated", utils::format_date(&detail.app_ver_updated_at)),
        ("Added", utils::format_date(detail.added_at())),
    ];
    for (label, value) in meta {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<13}", label), Style::default().fg(Color::Cyan)),
            Span::raw(value),
        ]));
    }

    if !detail.icon_url.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Icon         ", Style::default().fg(Color::Cyan)),
            Span::styled(detail.icon_url.clone(), Style::default().fg(Color::Blue)),
        ]));
    }

    let screenshots = detail.screenshots();
    if !screenshots.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Screenshots ({})", screenshots.len()),
            Style::default().fg(Color::Cyan),
        )));
        for shot in screenshots {
            lines.push(Line::from(Span::styled(
                format!("  {}", shot.file_url),
                Style::default().fg(Color::Blue),
            )));
        }
    }

    if !detail.full_description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Description",
            Style::default().fg(Color::Cyan),
        )));
        for part in detail.full_description.lines() {
            lines.push(Line::from(part.to_string()));
        }
    }

    let pane = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" App "));
    frame.render_widget(pane, area);
}

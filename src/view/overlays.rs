//! Overlay rendering (version history, download link, help popup)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::ActiveModal;

use super::utils;

pub fn render_modal(frame: &mut Frame, modal: &ActiveModal) {
    match modal {
        ActiveModal::VersionHistory {
            app_name,
            entries,
            error,
            scroll,
        } => {
            let area = centered_rect(70, 70, frame.area());
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" Version History: {} ", app_name));

            let lines = match (entries, error) {
                (_, Some(message)) => vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "Please try again later",
                        Style::default().fg(Color::Red),
                    )),
                ],
                (None, None) => vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Loading version history...",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                (Some(entries), None) if entries.is_empty() => vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "No version history available",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                (Some(entries), None) => {
                    let mut lines = Vec::new();
                    for entry in entries {
                        lines.push(Line::from(Span::styled(
                            format!("Version {}", entry.version_name),
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        lines.push(Line::from(Span::styled(
                            utils::format_date(&entry.app_ver_updated_at),
                            Style::default().fg(Color::DarkGray),
                        )));
                        for part in entry.whats_new.lines() {
                            lines.push(Line::from(part.to_string()));
                        }
                        lines.push(Line::from(""));
                    }
                    lines
                }
            };

            render_popup(frame, area, block, lines, *scroll);
        }
        ActiveModal::Download {
            app_name,
            info,
            error,
            scroll,
        } => {
            let area = centered_rect(70, 70, frame.area());
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" Download: {} ", app_name));

            let lines = match (info, error) {
                (_, Some(message)) => vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        "Please try again",
                        Style::default().fg(Color::Red),
                    )),
                ],
                (None, None) => vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Obtaining download link...",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                (Some(info), None) => {
                    let mut lines = Vec::new();
                    let urls = info.urls();
                    if !urls.is_empty() {
                        lines.push(Line::from(Span::styled(
                            "Download URLs",
                            Style::default().add_modifier(Modifier::BOLD),
                        )));
                        for url in urls {
                            lines.push(Line::from(Span::styled(
                                url,
                                Style::default().fg(Color::Blue),
                            )));
                        }
                        lines.push(Line::from(""));
                    }
                    lines.push(Line::from(Span::styled(
                        "Raw response",
                        Style::default().add_modifier(Modifier::BOLD),
                    )));
                    for part in info.pretty().lines() {
                        lines.push(Line::from(Span::styled(
                            part.to_string(),
                            Style::default().fg(Color::DarkGray),
                        )));
                    }
                    lines
                }
            };

            render_popup(frame, area, block, lines, *scroll);
        }
        ActiveModal::Help => {
            let area = centered_rect(50, 60, frame.area());
            let block = Block::default().borders(Borders::ALL).title(" Help ");
            let lines = vec![
                Line::from(Span::styled(
                    "Search",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("  type       edit query (searches as you type)"),
                Line::from("  Enter      search immediately"),
                Line::from("  Esc        clear query and results"),
                Line::from(""),
                Line::from(Span::styled(
                    "Results",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from("  ↑/↓        select app (↓ near the end loads more)"),
                Line::from("  Enter      version history"),
                Line::from("  d          download link"),
                Line::from("  /          back to search"),
                Line::from("  q          quit"),
            ];
            render_popup(frame, area, block, lines, 0);
        }
    }
}

fn render_popup(frame: &mut Frame, area: Rect, block: Block, lines: Vec<Line>, scroll: u16) {
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    frame.render_widget(popup, area);
}

/// Rect centered in `area`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

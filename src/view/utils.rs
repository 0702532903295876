//! Rendering helpers and display formatting for raw catalog values.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

/// Android version names by SDK level.
/// https://en.wikipedia.org/wiki/Android_version_history
const SDK_VERSIONS: [&str; 36] = [
    "1.0", "1.1", "1.5", "1.6", "2.0", "2.0.1", "2.1", "2.2", "2.3", "2.3.3", "3.0", "3.1", "3.2",
    "4.0", "4.0.3", "4.1", "4.2", "4.3", "4.4", "4.4W", "5.0", "5.1", "6.0", "7.0", "7.1", "8.0",
    "8.1", "9.0", "10", "11", "12", "12.1", "13", "14", "15", "16",
];

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Human name for a minimum SDK level, falling back to the raw API level.
pub fn android_version(sdk: u32) -> String {
    match sdk {
        1..=36 => format!("Android {}", SDK_VERSIONS[(sdk - 1) as usize]),
        _ => format!("API {}", sdk),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const SIZES: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(SIZES.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    format!("{} {}", value.round(), SIZES[exponent])
}

/// API timestamps are ISO-8601; fall back to the raw string for anything
/// unparseable.
pub fn format_date(raw: &str) -> String {
    if let Ok(date) = chrono::DateTime::parse_from_rfc3339(raw) {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

pub fn round_rating(rating: f64) -> f64 {
    (rating * 100.0).round() / 100.0
}

/// Five-glyph star strip with a half star for fractional ratings >= .5.
pub fn rating_stars(rating: f64) -> String {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating.fract() >= 0.5;

    let mut stars = String::new();
    for _ in 0..full {
        stars.push('★');
    }
    if half && full < 5 {
        stars.push('⯪');
    }
    while stars.chars().count() < 5 {
        stars.push('☆');
    }
    stars
}

/// Thousands grouping for counts (downloads, ratings).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

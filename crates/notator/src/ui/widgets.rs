//! Reusable widget builders.
//!
//! Pure functions that produce ratatui lines and blocks from data.
//! No state mutation happens here.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders};

pub fn selected_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::White)
}

pub fn dim_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM)
}

/// Bordered dialog frame with a black background.
pub fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .style(Style::default().bg(Color::Black))
}

/// A row of `[ label ]` buttons with the focused one highlighted.
pub fn button_row(labels: &[&str], focused: Option<usize>) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (idx, label) in labels.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("   "));
        }
        let style = if focused == Some(idx) {
            selected_style()
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[ {label} ]"), style));
    }
    Line::from(spans).centered()
}

/// A single-line text field. Empty fields show `placeholder` dimmed; the
/// focused field ends in a block cursor.
pub fn input_line(value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("> ")];
    if value.is_empty() && !placeholder.is_empty() {
        spans.push(Span::styled(placeholder.to_string(), dim_style()));
    } else {
        spans.push(Span::styled(
            value.to_string(),
            Style::default().fg(Color::White),
        ));
    }
    if focused {
        spans.push(Span::styled(" ", selected_style()));
    }
    Line::from(spans)
}

/// One line per item, the selected one highlighted.
pub fn list_lines<'a>(items: impl IntoIterator<Item = String>, selected: usize) -> Vec<Line<'a>> {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, label)| {
            let style = if idx == selected {
                selected_style()
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(label, style))
        })
        .collect()
}

/// Truncate to `max_len` characters with a trailing ellipsis.
pub fn truncate_label(label: &str, max_len: usize) -> String {
    let len = label.chars().count();
    if len <= max_len {
        return label.to_string();
    }
    if max_len <= 3 {
        return label.chars().take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut out: String = label.chars().take(keep).collect();
    out.push_str("...");
    out
}

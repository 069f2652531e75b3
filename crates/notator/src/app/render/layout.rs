use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::state::App;
use crate::keymap::{chord_label, Command};
use crate::timer::format_remaining;
use crate::ui::{dim_style, top_right, truncate_label};

const TAB_LABEL_MAX: usize = 24;
const TIMER_WIDTH: u16 = 7;

/// Render tab titles, the active one highlighted, modified ones marked `*`.
pub(super) fn render_tab_bar(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    let mut spans = Vec::with_capacity(app.tabs.len() * 2);
    for (idx, tab) in app.tabs.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("│", dim_style()));
        }
        let marker = if tab.has_unsaved_changes() { "*" } else { "" };
        let label = format!(" {}{marker} ", truncate_label(&tab.title, TAB_LABEL_MAX));
        let style = if idx == app.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status line: a transient notice if one is up, otherwise the save state.
pub(super) fn render_status_line(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    let (text, style) = match &app.notice {
        Some(notice) => (notice.text.clone(), Style::default().fg(Color::Yellow)),
        None if app.modified => {
            let text = match app.keymap.chord_for(Command::Save) {
                Some(chord) => format!("Ændringer ikke gemt ({})", chord_label(chord)),
                None => "Ændringer ikke gemt".to_string(),
            };
            (text, Style::default().fg(Color::LightRed))
        }
        None => ("Gemt".to_string(), Style::default().fg(Color::Green)),
    };

    let mode_label = if app.hemingway { "Hemingway" } else { "" };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(mode_label.chars().count() as u16),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, style))), chunks[0]);
    if !mode_label.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(mode_label, dim_style())))
                .alignment(Alignment::Right),
            chunks[1],
        );
    }
}

/// `mm:ss` in the top-right corner while a countdown runs, while the menu
/// is open and during the finished alert.
pub(super) fn render_timer_display(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    let now = app.now();
    let Some(display) = app.timer.display(now, app.config.timer.alert) else {
        return;
    };
    let style = if display.alert {
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    };
    let label = format!(" {} ", format_remaining(display.remaining));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Right),
        top_right(area, TIMER_WIDTH),
    );
}

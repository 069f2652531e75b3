use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::app::state::App;
use crate::editor::EditableText;

/// Draw the active tab's text, keeping the cursor row in view. Returns the
/// on-screen cursor position.
pub(super) fn render_work_area(
    app: &mut App,
    frame: &mut ratatui::Frame,
    area: Rect,
) -> Option<Position> {
    let hemingway = app.hemingway;
    let tab = app.active_tab_mut()?;
    let height = area.height as usize;
    if height == 0 || area.width == 0 {
        return None;
    }

    let (row, col) = tab.editor.cursor();
    if row < tab.scroll {
        tab.scroll = row;
    } else if row >= tab.scroll + height {
        tab.scroll = row + 1 - height;
    }
    let hscroll = col.saturating_sub(area.width.saturating_sub(1) as usize);

    let lines: Vec<Line> = tab
        .editor
        .lines()
        .iter()
        .skip(tab.scroll)
        .take(height)
        .map(|line| Line::raw(line.as_str()))
        .collect();
    let style = if hemingway {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(
        Paragraph::new(lines)
            .style(style)
            .scroll((0, hscroll.min(u16::MAX as usize) as u16)),
        area,
    );

    let x = area.x as usize + col - hscroll;
    let y = area.y as usize + row - tab.scroll;
    Some(Position::new(x as u16, y as u16))
}

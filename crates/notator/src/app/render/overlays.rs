use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use crate::app::state::App;
use crate::overlay::{
    Choice, OverlayFrame, QuoteView, DELETE_HEADING, HAIKU_SUBMIT, HAIKU_SYLLABLES,
};
use crate::timer::{preset_label, TimerState};
use crate::ui::{
    button_row, centered_fixed, centered_rect, dialog_block, dim_style, input_line, list_lines,
};

const CUSTOM_PLACEHOLDER: &str = "Brugerdefineret (f.eks. 90, 2m)";
const REMINDER_TEXT: &str = "Det er din tredje forespørgsel på et citat på under femten minutter.\n\
Selv de mest kraftfulde ord mister sin virkning, hvis de bruges som flugt.\n\
Prøv en vejrtrækningsøvelse i stedet, og mærk efter.";

/// Render whichever overlay frame is current.
pub(super) fn render_overlay(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    match app.overlays.frame() {
        OverlayFrame::None => {}
        OverlayFrame::TimerMenu => render_timer_menu(app, frame, area),
        OverlayFrame::OpenPrompt { entries, selected } => {
            let lines = list_lines(entries.iter().map(|entry| entry.name.clone()), *selected);
            render_dialog(frame, centered_rect(50, 50, area), "Åbn note", lines);
        }
        OverlayFrame::SaveAsPrompt { input, .. } => {
            let mut lines = vec![
                Line::styled("Filnavn", dim_style()),
                input_line(input, "", true),
            ];
            push_hint(app, &mut lines);
            render_dialog(frame, centered_fixed(50, 6, area), "Gem som", lines);
        }
        OverlayFrame::DeleteWarning { choice, verse, .. } => {
            let mut lines = vec![
                Line::styled(
                    DELETE_HEADING,
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
            ];
            lines.extend(
                verse
                    .lines()
                    .map(|line| Line::styled(line.to_string(), dim_style()).centered()),
            );
            lines.push(Line::raw(""));
            lines.push(button_row(
                &["Slet alligevel!", "Annuller"],
                Some(choice_index(*choice)),
            ));
            render_dialog(frame, centered_fixed(64, 11, area), "Slet note", lines);
        }
        OverlayFrame::HaikuGate { lines: haiku, focus, .. } => {
            let mut lines = vec![
                Line::styled(
                    "Skriv et haiku for at slette!",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
            ];
            for (idx, (text, syllables)) in haiku.iter().zip(HAIKU_SYLLABLES).enumerate() {
                let placeholder = format!("{syllables} stavelser");
                lines.push(input_line(text, &placeholder, *focus == idx));
            }
            lines.push(Line::raw(""));
            let submit_focus = (*focus == HAIKU_SUBMIT).then_some(0);
            lines.push(button_row(&["I overflod, beriges man af afsked!"], submit_focus));
            push_hint(app, &mut lines);
            render_dialog(frame, centered_fixed(60, 11, area), "Haiku", lines);
        }
        OverlayFrame::DiscardPrompt { choice, .. } => {
            let lines = vec![
                Line::raw("Noten har ændringer, der ikke er gemt."),
                Line::raw(""),
                button_row(
                    &["Luk uden at gemme", "Annuller"],
                    Some(choice_index(*choice)),
                ),
            ];
            render_dialog(frame, centered_fixed(56, 5, area), "Luk fane", lines);
        }
        OverlayFrame::QuoteViewer { view } => render_quote(frame, area, view),
    }
}

fn render_timer_menu(app: &App, frame: &mut ratatui::Frame, area: Rect) {
    let TimerState::Configuring {
        selected, custom, ..
    } = app.timer.state()
    else {
        return;
    };
    let presets = app.timer.presets();
    let mut lines = list_lines(presets.iter().map(|preset| preset_label(*preset)), *selected);
    lines.push(input_line(
        custom,
        CUSTOM_PLACEHOLDER,
        *selected == presets.len(),
    ));
    push_hint(app, &mut lines);
    let height = lines.len() as u16 + 2;
    render_dialog(frame, centered_fixed(40, height, area), "Timer", lines);
}

fn render_quote(frame: &mut ratatui::Frame, area: Rect, view: &QuoteView) {
    let lines = match view {
        QuoteView::Quote(text) => {
            let mut lines: Vec<Line> = text
                .lines()
                .map(|line| Line::raw(line.to_string()).centered())
                .collect();
            lines.push(Line::raw(""));
            lines.push(button_row(&["OK"], Some(0)));
            lines
        }
        QuoteView::Exhausted { choice } => vec![
            Line::raw("Alle citater er vist. Vil du starte forfra?").centered(),
            Line::raw(""),
            button_row(&["Ja", "Nej"], Some(choice_index(*choice))),
        ],
        QuoteView::Reminder => {
            let mut lines: Vec<Line> = REMINDER_TEXT
                .lines()
                .map(|line| Line::raw(line.to_string()).centered())
                .collect();
            lines.push(Line::raw(""));
            lines.push(button_row(&["Giv mig et citat, din fandens hippie!!!"], Some(0)));
            lines
        }
    };
    render_dialog(frame, centered_rect(70, 40, area), "Citat", lines);
}

fn render_dialog(frame: &mut ratatui::Frame, rect: Rect, title: &str, lines: Vec<Line>) {
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines)
            .block(dialog_block(title))
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(Color::Black)),
        rect,
    );
}

fn push_hint(app: &App, lines: &mut Vec<Line>) {
    if let Some(hint) = &app.hint {
        lines.push(Line::from(Span::styled(
            hint.clone(),
            Style::default().fg(Color::LightRed),
        )));
    }
}

fn choice_index(choice: Choice) -> usize {
    match choice {
        Choice::Confirm => 0,
        Choice::Cancel => 1,
    }
}

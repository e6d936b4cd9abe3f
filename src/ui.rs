use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use wordbox::{DrillView, MessageKind};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const EMPTY_SLOT: &str = "_";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let view = match (&self.state, self.view()) {
            (AppState::Drilling, Some(view)) => view,
            (AppState::Drilling, None) => return,
            (AppState::Unavailable(message), _) => {
                Paragraph::new(Span::styled(
                    message.as_str(),
                    Style::default().patch(bold_style).fg(Color::Red),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(centered_line(area), buf);
                return;
            }
        };

        let slot_rows = view.slots.len().max(1) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(1), // header
                    Constraint::Min(1),    // padding
                    Constraint::Length(slot_rows * 2 - 1),
                    Constraint::Length(1), // padding
                    Constraint::Length(1), // tip
                    Constraint::Length(1), // translation
                    Constraint::Length(1), // message
                    Constraint::Min(1),    // padding
                    Constraint::Length(1), // action
                    Constraint::Length(1), // legend
                ]
                .as_ref(),
            )
            .split(area);

        Paragraph::new(header_line(self, view, bold_style, dim_style))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        if view.layout.is_none() {
            Paragraph::new(Span::styled(
                "Press Tab to choose a theme",
                Style::default().patch(italic_style).fg(Color::Yellow),
            ))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
        } else {
            Paragraph::new(slot_lines(view, chunks[2].width, bold_style, dim_style))
                .alignment(Alignment::Center)
                .render(chunks[2], buf);
        }

        if !view.tip.is_empty() {
            Paragraph::new(Span::styled(format!("💡 Tip: {}", view.tip), italic_style))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[4], buf);
        }

        if !view.translation.is_empty() {
            Paragraph::new(Span::styled(
                view.translation.as_str(),
                Style::default().patch(bold_style).fg(Color::Cyan),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        if let Some((text, kind)) = &view.message {
            let color = match kind {
                MessageKind::Success => Color::Green,
                MessageKind::Error => Color::Red,
            };
            Paragraph::new(Span::styled(
                text.as_str(),
                Style::default().patch(bold_style).fg(color),
            ))
            .alignment(Alignment::Center)
            .render(chunks[6], buf);
        }

        if view.controls_enabled {
            Paragraph::new(Span::styled(
                format!("(enter) {}", view.action_label),
                Style::default().patch(bold_style).fg(Color::Magenta),
            ))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);
        }

        Paragraph::new(Span::styled(
            "(tab) theme (ctrl-r) reveal (ctrl-s) speak (esc) quit",
            Style::default().patch(italic_style).add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(chunks[9], buf);
    }
}

fn header_line<'a>(app: &App, view: &DrillView, bold: Style, dim: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled("theme ", dim),
        Span::styled(app.theme_display(), bold),
        Span::styled("   words ", dim),
        Span::styled(view.word_count.to_string(), bold),
        Span::styled("   time ", dim),
        Span::styled(view.timer.clone(), bold),
        Span::styled("   correct ", dim),
        Span::styled(format!("{}/{}", view.correct, view.total), bold),
        Span::styled("   acc ", dim),
        Span::styled(format!("{}%", view.accuracy), bold),
    ])
}

/// One line per slot row with a blank line between rows. Slots are spaced
/// out unless that would overflow the available width.
fn slot_lines<'a>(view: &DrillView, width: u16, bold: Style, dim: Style) -> Vec<Line<'a>> {
    let widest = view
        .slots
        .iter()
        .map(|row| {
            row.iter()
                .map(|slot| slot.map(|c| c.to_string()).unwrap_or_default())
                .collect::<String>()
                .width()
                .max(row.len())
        })
        .max()
        .unwrap_or(0);
    let spaced = widest * 2 <= width as usize;
    let color = if view.input_enabled {
        Color::White
    } else {
        Color::Green
    };

    let mut lines = Vec::new();
    for (idx, row) in view.slots.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        let mut spans = Vec::with_capacity(row.len() * 2);
        for slot in row {
            match slot {
                Some(c) => spans.push(Span::styled(c.to_string(), bold.fg(color))),
                None => spans.push(Span::styled(EMPTY_SLOT, dim)),
            }
            if spaced {
                spans.push(Span::raw(" "));
            }
        }
        if spaced {
            spans.pop();
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    }
}

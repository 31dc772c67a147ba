use crate::grid::events_overlapping;
use crate::model::Event;
use crate::render::{self, Rgb};
use crate::store::EventStore;
use crate::tui::state::{AppState, Field};
use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TIME_LABEL_WIDTH: u16 = 6;

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

pub fn draw<S: EventStore>(f: &mut Frame, state: &AppState<S>) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    draw_grid(f, state, v_chunks[0]);
    draw_footer(f, state, v_chunks[1]);

    if state.dialog_open() {
        draw_dialog(f, state);
    }
}

fn draw_grid<S: EventStore>(f: &mut Frame, state: &AppState<S>, area: Rect) {
    let dates = state.dates();
    let events = state.events();
    let inner_width = area.width.saturating_sub(2 + TIME_LABEL_WIDTH);
    let col_width = (inner_width / dates.len().max(1) as u16).max(3) as usize;

    let mut lines = Vec::new();
    let mut header = vec![Span::raw(" ".repeat(TIME_LABEL_WIDTH as usize))];
    for date in &dates {
        let label = format!("{:<w$.w$}", date.format("%a %d/%m").to_string(), w = col_width);
        header.push(Span::styled(label, Style::default().add_modifier(Modifier::BOLD)));
    }
    lines.push(Line::from(header));

    for slot in 0..state.grid.slots_per_day() {
        let mut spans = Vec::with_capacity(dates.len() + 1);
        let time_label = dates
            .first()
            .and_then(|d| state.grid.slot_range(*d, slot))
            .map(|(start, _)| start.format("%H:%M ").to_string())
            .unwrap_or_default();
        spans.push(Span::styled(
            format!("{:<w$}", time_label, w = TIME_LABEL_WIDTH as usize),
            Style::default().fg(Color::DarkGray),
        ));

        for (day, date) in dates.iter().enumerate() {
            let is_cursor = day == state.cursor_day && slot == state.cursor_slot;
            let Some((start, end)) = state.grid.slot_range(*date, slot) else {
                continue;
            };
            let hits = events_overlapping(&events, start, end);
            let shown = if is_cursor && !hits.is_empty() {
                hits.get(state.stack_index % hits.len())
            } else {
                hits.first()
            };
            let mut cell = match shown {
                Some(event) => {
                    let style = render::event_style(event);
                    let fill = Style::default().bg(rgb(style.fill)).fg(rgb(style.text));
                    let text = cell_label(event, start, slot == 0, hits.len());
                    let body = format!(
                        "{:<w$.w$}",
                        text,
                        w = col_width.saturating_sub(1)
                    );
                    vec![
                        Span::styled("▌", Style::default().fg(rgb(style.accent)).bg(rgb(style.fill))),
                        Span::styled(body, fill),
                    ]
                }
                None => vec![Span::styled(
                    format!("{:<w$}", "·", w = col_width),
                    Style::default().fg(Color::DarkGray),
                )],
            };
            if is_cursor {
                for span in &mut cell {
                    span.style = span.style.add_modifier(Modifier::REVERSED);
                }
            }
            spans.extend(cell);
        }
        lines.push(Line::from(spans));
    }

    let title = match (dates.first(), dates.last()) {
        (Some(first), Some(last)) if first != last => format!(
            " {} {} - {} ",
            state.view.label(),
            first.format("%d %b"),
            last.format("%d %b %Y")
        ),
        (Some(first), _) => format!(" {} {} ", state.view.label(), first.format("%a %d %b %Y")),
        _ => format!(" {} ", state.view.label()),
    };
    let grid = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(grid, area);
}

/// Title on the event's first visible row, which is slot 0 for events that
/// begin before the grid does. `+N` marks other events sharing the slot.
fn cell_label(event: &Event, slot_start: NaiveDateTime, top_row: bool, stacked: usize) -> String {
    let first_row = top_row || event.start >= slot_start;
    match (first_row, stacked) {
        (true, 0 | 1) => event.title.clone(),
        (true, n) => format!("+{} {}", n - 1, event.title),
        (false, 0 | 1) => String::new(),
        (false, n) => format!("+{}", n - 1),
    }
}

fn draw_footer<S: EventStore>(f: &mut Frame, state: &AppState<S>, area: Rect) {
    let footer_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let status_color = if state.message.contains("Error") {
        Color::Red
    } else {
        Color::Cyan
    };
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(status_color))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );

    let shortcuts = if state.dialog_open() {
        "Tab: Field | Enter: Save | Esc: Cancel"
    } else {
        "Enter: Pick | Tab: Next in slot | n: New | v: View | q: Quit"
    };
    let help = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );

    f.render_widget(status, footer_chunks[0]);
    f.render_widget(help, footer_chunks[1]);
}

fn draw_dialog<S: EventStore>(f: &mut Frame, state: &AppState<S>) {
    let Some(dialog) = state.controller.dialog() else {
        return;
    };
    let draft = dialog.draft;
    let area = centered_rect(60, 50, f.area());

    let row = |field: Field, value: Span<'static>| {
        let marker = if state.field == field { "> " } else { "  " };
        let label_style = if state.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{}{:<14}", marker, field.label()), label_style),
            value,
        ])
    };

    let fill = render::fill_color(draft.color);
    let accent = render::accent_color(draft.urgency);
    let lines = vec![
        Line::from(Span::styled(
            format!(
                "{} {} - {}",
                draft.start.format("%a %d %b"),
                draft.start.format("%H:%M"),
                draft.end.format("%H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        row(Field::Title, Span::raw(format!("{}_", draft.title))),
        row(Field::Description, Span::raw(draft.description.clone())),
        row(Field::End, Span::raw(draft.end.format("%H:%M").to_string())),
        row(
            Field::Color,
            Span::styled(
                format!(" {} ", draft.color.name()),
                Style::default().bg(rgb(fill)).fg(if fill.is_dark() {
                    Color::White
                } else {
                    Color::Black
                }),
            ),
        ),
        row(
            Field::Urgency,
            Span::styled(
                draft.urgency.label().to_string(),
                Style::default().fg(rgb(accent)).add_modifier(Modifier::BOLD),
            ),
        ),
        Line::from(""),
        Line::from(Span::styled(
            if dialog.can_delete {
                format!("Enter: {} | Esc: Cancel | Ctrl-D: Delete", dialog.commit_label)
            } else {
                format!("Enter: {} | Esc: Cancel", dialog.commit_label)
            },
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", dialog.title))
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

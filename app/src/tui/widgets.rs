//! Drawing a `Screen` with ratatui.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use todo_core::view::render::{ADD_LABEL, DELETE_GLYPH, HEADING, LOADING_TEXT};
use todo_core::view::{ConfirmPrompt, ListScreen, Row, Screen};

use super::{Mode, UiState};

const DIALOG_HEIGHT: u16 = 5;

pub fn render_frame(frame: &mut Frame, screen: &Screen, ui: &UiState) {
    let area = frame.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {HEADING} "), Style::default().add_modifier(Modifier::BOLD)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match screen {
        Screen::Loading => {
            frame.render_widget(Paragraph::new(LOADING_TEXT), inner);
        }
        Screen::Error { message } => {
            let text = vec![
                Line::from(Span::styled(format!("Error: {message}"), Style::default().fg(Color::Red))),
                Line::default(),
                Line::from(Span::styled("r reload · q quit", Style::default().fg(Color::DarkGray))),
            ];
            frame.render_widget(Paragraph::new(text), inner);
        }
        Screen::List(list) => render_list(frame, inner, list, ui),
    }
}

fn render_list(frame: &mut Frame, area: Rect, list: &ListScreen, ui: &UiState) {
    let notice_height = u16::from(list.notice.is_some());
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(notice_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(input_box(&list.draft, ui.mode), chunks[0]);

    if let Some(notice) = &list.notice {
        let line = Line::from(vec![
            Span::styled(notice.as_str(), Style::default().fg(Color::Red)),
            Span::styled("  (x to dismiss)", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[1]);
    }

    let items: Vec<ListItem> = list.rows.iter().map(|row| ListItem::new(row_line(row))).collect();
    let widget = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(ui.selected(list.rows.len()));
    frame.render_stateful_widget(widget, chunks[2], &mut state);

    frame.render_widget(Paragraph::new(help_line(ui.mode)), chunks[3]);

    if let Some(prompt) = &list.confirm {
        render_confirm(frame, area, prompt);
    }
}

fn input_box(draft: &str, mode: Mode) -> Paragraph<'_> {
    let border = match mode {
        Mode::Editing => Style::default().fg(Color::Yellow),
        Mode::Normal => Style::default(),
    };
    Paragraph::new(draft).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title_bottom(Line::from(format!(" Enter: {ADD_LABEL} ")).right_aligned()),
    )
}

/// Marker, title (struck through when done), checkbox and delete control.
pub fn row_line(row: &Row) -> Line<'_> {
    let title_style = if row.struck {
        Style::default().add_modifier(Modifier::CROSSED_OUT).fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let checkbox = if row.checked { "[x]" } else { "[ ]" };
    Line::from(vec![
        Span::raw(format!("{} ", row.marker.glyph())),
        Span::styled(row.title.as_str(), title_style),
        Span::raw(format!(" {checkbox}")),
        Span::raw(" / "),
        Span::raw(DELETE_GLYPH),
    ])
}

fn help_line(mode: Mode) -> Line<'static> {
    let text = match mode {
        Mode::Editing => "Enter add · Esc done",
        Mode::Normal => "a edit · j/k move · space toggle · d delete · x dismiss · q quit",
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn render_confirm(frame: &mut Frame, area: Rect, prompt: &ConfirmPrompt) {
    let question = prompt.question();
    let width = (question.chars().count() as u16).saturating_add(6).max(24);
    let dialog_area = centered_rect(width, DIALOG_HEIGHT, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Delete? ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    let text = vec![
        Line::from(format!(" {question}")),
        Line::from(vec![
            Span::raw(" ("),
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(")"),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).block(block), dialog_area);
}

/// Centered rectangle of the given size within `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}

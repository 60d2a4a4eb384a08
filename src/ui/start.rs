use crate::models::{FormField, StartForm};
use crate::provider::{MAX_AMOUNT, MIN_AMOUNT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn draw_field(f: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let field = Paragraph::new(Span::styled(value, value_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
    f.render_widget(field, area);
}

pub fn draw_start(f: &mut Frame, form: &StartForm, notice: Option<&str>, loading: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Interactive Trivia v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    draw_field(
        f,
        chunks[1],
        "Category",
        form.category().label(),
        form.focus == FormField::Category,
    );
    draw_field(
        f,
        chunks[2],
        "Difficulty",
        form.difficulty().label(),
        form.focus == FormField::Difficulty,
    );
    let amount_title = format!("Questions ({}-{})", MIN_AMOUNT, MAX_AMOUNT);
    draw_field(
        f,
        chunks[3],
        &amount_title,
        &form.amount.to_string(),
        form.focus == FormField::Amount,
    );

    let status = if loading {
        Some(Line::from(Span::styled(
            "Fetching questions...",
            Style::default().fg(Color::Yellow),
        )))
    } else {
        notice.map(|text| Line::from(Span::styled(text, Style::default().fg(Color::Red))))
    };
    if let Some(line) = status {
        let status = Paragraph::new(line).alignment(Alignment::Center);
        f.render_widget(status, chunks[4]);
    }

    let help_text = vec![Line::from(vec![
        Span::styled(
            "Tab",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Next Field  "),
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Change  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Start Quiz  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[5]);
}

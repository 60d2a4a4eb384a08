use crate::models::{AnswerOutcome, QuizSession};
use crate::ui::layout::calculate_quiz_chunks;
use crate::utils::decode_html;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

fn option_style(index: usize, session: &QuizSession) -> Style {
    if let Some(reveal) = &session.reveal {
        let (selected, correct) = match reveal.outcome {
            AnswerOutcome::Correct { selected } => (Some(selected), Some(selected)),
            AnswerOutcome::Wrong { selected, correct } => (Some(selected), correct),
            AnswerOutcome::TimedOut { correct } => (None, correct),
        };
        if correct == Some(index) {
            return Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD);
        }
        if selected == Some(index) {
            return Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        }
        return Style::default().fg(Color::DarkGray);
    }

    if index == session.selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn status_span(session: &QuizSession, now: Instant) -> Span<'static> {
    if let Some(reveal) = &session.reveal {
        return match reveal.outcome {
            AnswerOutcome::Correct { .. } => Span::styled(
                "Correct!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            AnswerOutcome::Wrong { .. } => Span::styled(
                "Wrong",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            AnswerOutcome::TimedOut { .. } => Span::styled(
                "Time's up!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        };
    }

    let remaining = session
        .countdown
        .map(|countdown| countdown.remaining_secs(now))
        .unwrap_or(0);
    let style = if remaining <= 5 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("⏱ {}s", remaining), style)
}

pub fn draw_quiz(f: &mut Frame, session: &QuizSession, now: Instant) {
    let layout = calculate_quiz_chunks(f.area());

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(layout.header_area);

    let progress = format!(
        "Question {} / {}",
        session.current_index + 1,
        session.questions.len()
    );
    let header = Paragraph::new(progress)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, header_chunks[0]);

    let timer = Paragraph::new(Line::from(status_span(session, now)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(timer, header_chunks[1]);

    let prompt = session
        .current_question()
        .map(|q| decode_html(&q.question))
        .unwrap_or_default();
    let question = Paragraph::new(Text::from(prompt))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question, layout.question_area);

    let items: Vec<ListItem> = session
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if session.reveal.is_none() && i == session.selected {
                "▸ "
            } else {
                "  "
            };
            ListItem::new(format!("{}{}", marker, option)).style(option_style(i, session))
        })
        .collect();
    let answers = List::new(items).block(Block::default().borders(Borders::ALL).title("Answers"));
    f.render_widget(answers, layout.answers_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "↑/↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Select  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Answer  "),
        Span::styled(
            "s",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Skip  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit to Start"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

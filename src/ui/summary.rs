use crate::models::{score_percent, QuestionOutcome, QuizSession};
use crate::ui::layout::calculate_summary_chunks;
use crate::utils::{decode_html, truncate_string};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn outcome_marker(outcome: QuestionOutcome) -> Span<'static> {
    match outcome {
        QuestionOutcome::Correct => Span::styled("[✓]", Style::default().fg(Color::Green)),
        QuestionOutcome::Wrong => Span::styled("[✗]", Style::default().fg(Color::Red)),
        QuestionOutcome::Skipped => Span::styled("[→]", Style::default().fg(Color::DarkGray)),
        QuestionOutcome::TimedOut => Span::styled("[⏱]", Style::default().fg(Color::Yellow)),
    }
}

pub fn draw_summary(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_summary_chunks(f.area());

    let title = Paragraph::new("Quiz Finished")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let total = session.questions.len();
    let percent = score_percent(session.score, total);

    let mut summary_text = Text::default();
    summary_text.push_line(Line::from(vec![
        Span::from("Score: "),
        Span::styled(
            format!("{}", session.score),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" / {}  ({}%)", total, percent)),
    ]));
    summary_text.push_line(Line::from(""));

    for (i, question) in session.questions.iter().enumerate() {
        let marker = session
            .outcomes
            .get(i)
            .copied()
            .map(outcome_marker)
            .unwrap_or_else(|| Span::from("[ ]"));
        summary_text.push_line(Line::from(vec![
            marker,
            Span::from(format!(
                " {}. {}",
                i + 1,
                truncate_string(&decode_html(&question.question), 60)
            )),
        ]));
    }

    let summary = Paragraph::new(summary_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(summary, layout.content_area);

    let help_text = vec![Line::from(vec![
        Span::styled(
            "r",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Play Again  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}

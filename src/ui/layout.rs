use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub answers_area: Rect,
    pub help_area: Rect,
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        answers_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    SummaryLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_quiz_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.answers_area.height, 6);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.question_area.height > 0);
    }

    #[test]
    fn test_summary_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_summary_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 3);
        // margin 1 on both sides leaves 38 rows
        assert_eq!(layout.content_area.height, 38 - 6);
    }
}

use crate::logger;
use crate::models::{
    AnswerOutcome, AppState, Countdown, Question, QuestionOutcome, QuizSession, Reveal, StartForm,
    REVEAL_DELAY,
};
use crate::provider::FetchConfig;
use crate::utils::decode_html;
use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use std::time::Instant;

/// What the start screen asked the event loop to do.
#[derive(Debug, PartialEq)]
pub enum StartAction {
    None,
    Begin(FetchConfig),
    Exit,
}

pub fn handle_start_input(form: &mut StartForm, key: KeyEvent) -> StartAction {
    match key.code {
        KeyCode::Tab => {
            form.next_field();
            StartAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            form.increment();
            StartAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            form.decrement();
            StartAction::None
        }
        KeyCode::Enter => StartAction::Begin(form.config()),
        KeyCode::Esc | KeyCode::Char('q') => StartAction::Exit,
        _ => StartAction::None,
    }
}

/// Build a session from a fetched question batch and show the first
/// question. An empty batch lands directly on the summary screen.
pub fn begin_session(
    questions: Vec<Question>,
    app_state: &mut AppState,
    now: Instant,
) -> QuizSession {
    logger::log(&format!("starting session with {} questions", questions.len()));
    let mut session = QuizSession::new(questions);
    present_question(&mut session, app_state, now);
    session
}

/// Entry action for the question screen. Replaces any previous countdown,
/// so two can never run against the same session.
fn present_question(session: &mut QuizSession, app_state: &mut AppState, now: Instant) {
    session.countdown = None;
    session.reveal = None;

    let Some(question) = session.current_question() else {
        logger::log(&format!(
            "questions exhausted, score {}/{}",
            session.score,
            session.questions.len()
        ));
        *app_state = AppState::Summary;
        return;
    };

    let mut options: Vec<String> = question
        .incorrect_answers
        .iter()
        .chain(std::iter::once(&question.correct_answer))
        .map(|answer| decode_html(answer))
        .collect();
    options.shuffle(&mut rand::thread_rng());

    session.options = options;
    session.selected = 0;
    session.countdown = Some(Countdown::start(now));
    *app_state = AppState::Quiz;
}

/// Position of the correct answer within the shuffled presentation order,
/// found by decoded-text match rather than a remembered index.
fn correct_option_index(session: &QuizSession) -> Option<usize> {
    let question = session.current_question()?;
    let correct = decode_html(&question.correct_answer);
    session.options.iter().position(|option| *option == correct)
}

/// Evaluate the highlighted option. A second call for the same question is
/// a no-op: the countdown is already cancelled and the reveal pending.
pub fn submit_answer(session: &mut QuizSession, now: Instant) {
    if session.reveal.is_some() || session.countdown.is_none() {
        return;
    }
    session.countdown = None;

    let correct = correct_option_index(session);
    let selected = session.selected;
    let is_correct = correct == Some(selected);

    let outcome = if is_correct {
        session.score += 1;
        session.outcomes.push(QuestionOutcome::Correct);
        AnswerOutcome::Correct { selected }
    } else {
        session.outcomes.push(QuestionOutcome::Wrong);
        AnswerOutcome::Wrong { selected, correct }
    };
    logger::log(&format!(
        "question {} answered, correct={}, score {}",
        session.current_index + 1,
        is_correct,
        session.score
    ));

    session.reveal = Some(Reveal {
        outcome,
        advance_at: now + REVEAL_DELAY,
    });
}

/// Skip the current question: cancel the countdown and advance at once,
/// with no reveal pause and no score change.
pub fn skip_question(session: &mut QuizSession, app_state: &mut AppState, now: Instant) {
    if session.reveal.is_some() {
        return;
    }
    session.countdown = None;
    session.outcomes.push(QuestionOutcome::Skipped);
    logger::log(&format!("question {} skipped", session.current_index + 1));
    session.current_index += 1;
    present_question(session, app_state, now);
}

/// Abandon the session and return to the start screen. The event loop
/// drops the session once the state leaves the quiz.
pub fn quit_session(session: &mut QuizSession, app_state: &mut AppState) {
    session.countdown = None;
    session.reveal = None;
    logger::log("session quit");
    *app_state = AppState::Start;
}

/// Drive time-based transitions: countdown expiry and the end of the
/// reveal pause. Called once per event-loop iteration while in the quiz.
pub fn tick(session: &mut QuizSession, app_state: &mut AppState, now: Instant) {
    if let Some(reveal) = session.reveal {
        if now >= reveal.advance_at {
            session.reveal = None;
            session.current_index += 1;
            present_question(session, app_state, now);
        }
        return;
    }

    if let Some(countdown) = session.countdown
        && countdown.expired(now)
    {
        session.countdown = None;
        session.outcomes.push(QuestionOutcome::TimedOut);
        logger::log(&format!("question {} timed out", session.current_index + 1));
        session.reveal = Some(Reveal {
            outcome: AnswerOutcome::TimedOut {
                correct: correct_option_index(session),
            },
            advance_at: now + REVEAL_DELAY,
        });
    }
}

pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
    now: Instant,
) {
    match key.code {
        KeyCode::Esc => quit_session(session, app_state),
        KeyCode::Up | KeyCode::Char('k') => {
            if session.reveal.is_none() && session.selected > 0 {
                session.selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if session.reveal.is_none()
                && session.selected < session.options.len().saturating_sub(1)
            {
                session.selected += 1;
            }
        }
        KeyCode::Enter => submit_answer(session, now),
        KeyCode::Char('s') => skip_question(session, app_state, now),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{score_percent, Question, QUESTION_SECS};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Duration;

    fn question(prompt: &str, correct: &str, wrong: [&str; 3]) -> Question {
        Question {
            question: prompt.to_string(),
            correct_answer: correct.to_string(),
            incorrect_answers: wrong.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn three_questions() -> Vec<Question> {
        vec![
            question("Q1", "A1", ["B1", "C1", "D1"]),
            question("Q2", "A2", ["B2", "C2", "D2"]),
            question("Q3", "A3", ["B3", "C3", "D3"]),
        ]
    }

    fn select_correct(session: &mut QuizSession) {
        session.selected = correct_option_index(session).expect("correct option present");
    }

    fn select_wrong(session: &mut QuizSession) {
        let correct = correct_option_index(session).expect("correct option present");
        session.selected = (0..session.options.len())
            .find(|i| *i != correct)
            .expect("more than one option");
    }

    fn finish_reveal(session: &mut QuizSession, app_state: &mut AppState, now: Instant) -> Instant {
        let later = now + REVEAL_DELAY + Duration::from_millis(1);
        tick(session, app_state, later);
        later
    }

    #[test]
    fn test_begin_session_presents_first_question() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let session = begin_session(three_questions(), &mut app_state, now);

        assert_eq!(app_state, AppState::Quiz);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.options.len(), 4);
        assert!(session.countdown.is_some());
        assert_eq!(
            session.countdown.unwrap().remaining_secs(now),
            QUESTION_SECS
        );
    }

    #[test]
    fn test_empty_question_set_goes_straight_to_summary() {
        let mut app_state = AppState::Loading;
        let session = begin_session(Vec::new(), &mut app_state, Instant::now());

        assert_eq!(app_state, AppState::Summary);
        assert_eq!(session.score, 0);
        assert_eq!(score_percent(session.score, session.questions.len()), 0);
        assert!(session.countdown.is_none());
    }

    #[test]
    fn test_options_are_decoded_for_presentation() {
        let mut app_state = AppState::Loading;
        let questions = vec![question(
            "Genre?",
            "Rock &amp; Roll",
            ["Jazz", "Blues", "R&amp;B"],
        )];
        let session = begin_session(questions, &mut app_state, Instant::now());

        assert!(session.options.iter().any(|o| o == "Rock & Roll"));
        assert!(session.options.iter().any(|o| o == "R&B"));
        assert!(!session.options.iter().any(|o| o.contains("&amp;")));
    }

    #[test]
    fn test_correct_answer_scores_by_decoded_equality() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let questions = vec![question(
            "Genre?",
            "Rock &amp; Roll",
            ["Jazz", "Blues", "Folk"],
        )];
        let mut session = begin_session(questions, &mut app_state, now);

        select_correct(&mut session);
        submit_answer(&mut session, now);

        assert_eq!(session.score, 1);
        assert!(session.countdown.is_none());
        assert!(matches!(
            session.reveal.unwrap().outcome,
            AnswerOutcome::Correct { .. }
        ));
    }

    #[test]
    fn test_wrong_answer_marks_the_correct_option() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        let correct = correct_option_index(&session);
        select_wrong(&mut session);
        submit_answer(&mut session, now);

        assert_eq!(session.score, 0);
        match session.reveal.unwrap().outcome {
            AnswerOutcome::Wrong { selected, correct: marked } => {
                assert_ne!(Some(selected), correct);
                assert_eq!(marked, correct);
            }
            other => panic!("expected Wrong outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_submit_is_idempotent_per_question() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        select_correct(&mut session);
        submit_answer(&mut session, now);
        submit_answer(&mut session, now);
        submit_answer(&mut session, now + Duration::from_millis(100));

        assert_eq!(session.score, 1);
        assert_eq!(session.outcomes.len(), 1);
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn test_submit_without_countdown_is_ignored() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        // Countdown already expired and cleared by the tick.
        let expiry = now + Duration::from_secs(QUESTION_SECS);
        tick(&mut session, &mut app_state, expiry);
        assert!(session.countdown.is_none());

        select_correct(&mut session);
        submit_answer(&mut session, expiry);
        assert_eq!(session.score, 0);
        assert_eq!(session.outcomes, vec![QuestionOutcome::TimedOut]);
    }

    #[test]
    fn test_reveal_holds_until_delay_elapses() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        select_correct(&mut session);
        submit_answer(&mut session, now);

        tick(&mut session, &mut app_state, now + Duration::from_millis(500));
        assert_eq!(session.current_index, 0);
        assert!(session.reveal.is_some());

        tick(&mut session, &mut app_state, now + REVEAL_DELAY);
        assert_eq!(session.current_index, 1);
        assert!(session.reveal.is_none());
        assert!(session.countdown.is_some());
    }

    #[test]
    fn test_timeout_counts_as_unanswered() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        let expiry = now + Duration::from_secs(QUESTION_SECS);
        tick(&mut session, &mut app_state, expiry);

        assert_eq!(session.score, 0);
        assert!(session.countdown.is_none());
        match session.reveal.unwrap().outcome {
            AnswerOutcome::TimedOut { correct } => assert!(correct.is_some()),
            other => panic!("expected TimedOut outcome, got {:?}", other),
        }

        finish_reveal(&mut session, &mut app_state, expiry);
        assert_eq!(session.current_index, 1);
        assert_eq!(app_state, AppState::Quiz);
    }

    #[test]
    fn test_skip_advances_immediately_without_score() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        skip_question(&mut session, &mut app_state, now);

        assert_eq!(session.current_index, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.outcomes, vec![QuestionOutcome::Skipped]);
        assert!(session.reveal.is_none());
        assert!(session.countdown.is_some());
    }

    #[test]
    fn test_skip_on_last_question_reaches_summary() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let questions = vec![question("Q1", "A1", ["B1", "C1", "D1"])];
        let mut session = begin_session(questions, &mut app_state, now);

        skip_question(&mut session, &mut app_state, now);

        assert_eq!(app_state, AppState::Summary);
        assert_eq!(session.current_index, session.questions.len());
        assert!(session.countdown.is_none());
    }

    #[test]
    fn test_skip_during_reveal_is_ignored() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        select_correct(&mut session);
        submit_answer(&mut session, now);
        skip_question(&mut session, &mut app_state, now);

        assert_eq!(session.current_index, 0);
        assert_eq!(session.outcomes, vec![QuestionOutcome::Correct]);
    }

    #[test]
    fn test_rapid_skip_never_leaves_two_countdowns() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        let later = now + Duration::from_secs(5);
        skip_question(&mut session, &mut app_state, later);
        let even_later = later + Duration::from_millis(50);
        skip_question(&mut session, &mut app_state, even_later);

        // The countdown is a single slot, and the live one is the freshest.
        let countdown = session.countdown.expect("one countdown active");
        assert_eq!(countdown.remaining_secs(even_later), QUESTION_SECS);
        assert_eq!(session.current_index, 2);
    }

    #[test]
    fn test_quit_cancels_countdown_and_returns_to_start() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        quit_session(&mut session, &mut app_state);

        assert_eq!(app_state, AppState::Start);
        assert!(session.countdown.is_none());
        assert!(session.reveal.is_none());
    }

    #[test]
    fn test_score_never_exceeds_question_count() {
        let mut app_state = AppState::Loading;
        let mut now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        while app_state == AppState::Quiz {
            assert!(session.score <= session.questions.len());
            assert!(session.current_index <= session.questions.len());
            select_correct(&mut session);
            submit_answer(&mut session, now);
            now = finish_reveal(&mut session, &mut app_state, now);
        }

        assert_eq!(session.score, 3);
        assert_eq!(score_percent(session.score, session.questions.len()), 100);
    }

    #[test]
    fn test_mixed_session_scores_one_of_three() {
        let mut app_state = AppState::Loading;
        let mut now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        // Q1 answered correctly.
        select_correct(&mut session);
        submit_answer(&mut session, now);
        now = finish_reveal(&mut session, &mut app_state, now);
        assert_eq!(session.current_index, 1);

        // Q2 answered incorrectly.
        select_wrong(&mut session);
        submit_answer(&mut session, now);
        now = finish_reveal(&mut session, &mut app_state, now);
        assert_eq!(session.current_index, 2);

        // Q3 times out.
        now += Duration::from_secs(QUESTION_SECS);
        tick(&mut session, &mut app_state, now);
        finish_reveal(&mut session, &mut app_state, now);

        assert_eq!(app_state, AppState::Summary);
        assert_eq!(session.score, 1);
        assert_eq!(score_percent(session.score, session.questions.len()), 33);
        assert_eq!(
            session.outcomes,
            vec![
                QuestionOutcome::Correct,
                QuestionOutcome::Wrong,
                QuestionOutcome::TimedOut
            ]
        );
    }

    #[test]
    fn test_option_navigation_stays_in_bounds() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::empty());
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::empty());

        handle_quiz_input(&mut session, up, &mut app_state, now);
        assert_eq!(session.selected, 0);

        for _ in 0..10 {
            handle_quiz_input(&mut session, down, &mut app_state, now);
        }
        assert_eq!(session.selected, session.options.len() - 1);

        handle_quiz_input(&mut session, up, &mut app_state, now);
        assert_eq!(session.selected, session.options.len() - 2);
    }

    #[test]
    fn test_navigation_frozen_during_reveal() {
        let mut app_state = AppState::Loading;
        let now = Instant::now();
        let mut session = begin_session(three_questions(), &mut app_state, now);

        session.selected = 1;
        submit_answer(&mut session, now);

        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::empty());
        handle_quiz_input(&mut session, down, &mut app_state, now);
        assert_eq!(session.selected, 1);
    }

    #[test]
    fn test_start_input_adjusts_form_and_begins() {
        let mut form = StartForm::default();

        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::empty());
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::empty());
        assert_eq!(handle_start_input(&mut form, tab), StartAction::None);
        assert_eq!(handle_start_input(&mut form, tab), StartAction::None);
        assert_eq!(handle_start_input(&mut form, up), StartAction::None);
        assert_eq!(form.amount, 6);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::empty());
        match handle_start_input(&mut form, enter) {
            StartAction::Begin(config) => assert_eq!(config.amount, 6),
            other => panic!("expected Begin, got {:?}", other),
        }

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(handle_start_input(&mut form, esc), StartAction::Exit);
    }
}

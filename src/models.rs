use crate::provider::{Category, Difficulty, FetchConfig, MAX_AMOUNT, MIN_AMOUNT};
use serde::Deserialize;
use std::time::{Duration, Instant};

/// Seconds the player has to answer each question.
pub const QUESTION_SECS: u64 = 20;

/// Pause after an answer is evaluated (or times out) before advancing,
/// long enough to see the marked outcome.
pub const REVEAL_DELAY: Duration = Duration::from_millis(900);

/// One multiple-choice question as delivered by the provider. Text fields
/// stay HTML-encoded until presentation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Question {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// The single live countdown for the current question. It is data, not a
/// timer object: cancelling means dropping it, so a stale countdown can
/// never fire after the session has moved on.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    deadline: Instant,
}

impl Countdown {
    pub fn start(now: Instant) -> Self {
        Self {
            deadline: now + Duration::from_secs(QUESTION_SECS),
        }
    }

    /// Whole seconds left, rounded up so the display starts at the full
    /// duration and reads 1 right before expiry.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let left = self.deadline.saturating_duration_since(now);
        left.as_millis().div_ceil(1000) as u64
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

/// How the current question was resolved. Indices point into the shuffled
/// presentation order of `QuizSession::options`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerOutcome {
    Correct { selected: usize },
    Wrong { selected: usize, correct: Option<usize> },
    TimedOut { correct: Option<usize> },
}

/// The evaluated question stays on screen with its markings until
/// `advance_at` passes.
#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    pub outcome: AnswerOutcome,
    pub advance_at: Instant,
}

/// Per-question result kept for the summary screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionOutcome {
    Correct,
    Wrong,
    Skipped,
    TimedOut,
}

#[derive(Debug)]
pub struct QuizSession {
    pub questions: Vec<Question>,
    pub current_index: usize,
    pub score: usize,
    /// Decoded answer options for the current question, in shuffled
    /// presentation order. Rebuilt on every question entry.
    pub options: Vec<String>,
    /// Highlighted option.
    pub selected: usize,
    pub countdown: Option<Countdown>,
    pub reveal: Option<Reveal>,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0,
            options: Vec::new(),
            selected: 0,
            countdown: None,
            reveal: None,
            outcomes: Vec::new(),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }
}

/// Final score as a rounded percentage. A session with zero questions
/// scores 0.
pub fn score_percent(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Category,
    Difficulty,
    Amount,
}

/// State of the start/configuration form.
#[derive(Debug)]
pub struct StartForm {
    pub category_index: usize,
    pub difficulty_index: usize,
    pub amount: usize,
    pub focus: FormField,
}

impl Default for StartForm {
    fn default() -> Self {
        Self {
            category_index: 0,
            difficulty_index: 0,
            amount: 5,
            focus: FormField::Category,
        }
    }
}

impl StartForm {
    pub fn category(&self) -> Category {
        Category::ALL[self.category_index]
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty_index]
    }

    pub fn config(&self) -> FetchConfig {
        FetchConfig {
            category: self.category(),
            difficulty: self.difficulty(),
            amount: self.amount,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            FormField::Category => FormField::Difficulty,
            FormField::Difficulty => FormField::Amount,
            FormField::Amount => FormField::Category,
        };
    }

    pub fn increment(&mut self) {
        match self.focus {
            FormField::Category => {
                self.category_index = (self.category_index + 1) % Category::ALL.len();
            }
            FormField::Difficulty => {
                self.difficulty_index = (self.difficulty_index + 1) % Difficulty::ALL.len();
            }
            FormField::Amount => {
                self.amount = (self.amount + 1).min(MAX_AMOUNT);
            }
        }
    }

    pub fn decrement(&mut self) {
        match self.focus {
            FormField::Category => {
                let len = Category::ALL.len();
                self.category_index = (self.category_index + len - 1) % len;
            }
            FormField::Difficulty => {
                let len = Difficulty::ALL.len();
                self.difficulty_index = (self.difficulty_index + len - 1) % len;
            }
            FormField::Amount => {
                self.amount = self.amount.saturating_sub(1).max(MIN_AMOUNT);
            }
        }
    }
}

#[derive(Debug)]
pub enum ProviderRequest {
    Fetch { config: FetchConfig },
}

#[derive(Debug)]
pub enum ProviderResponse {
    Loaded { questions: Vec<Question> },
    Failed { error: String },
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Start,
    Loading,
    Quiz,
    Summary,
}

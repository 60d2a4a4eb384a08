pub mod logger;
pub mod models;
pub mod provider;
pub mod provider_worker;
pub mod session;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use models::{
    score_percent, AnswerOutcome, AppState, Countdown, FormField, ProviderRequest,
    ProviderResponse, Question, QuestionOutcome, QuizSession, Reveal, StartForm, QUESTION_SECS,
    REVEAL_DELAY,
};
pub use provider::{
    Category, Difficulty, FetchConfig, ProviderError, TriviaClient, MAX_AMOUNT, MIN_AMOUNT,
};
pub use provider_worker::spawn_provider_worker;
pub use session::{
    begin_session, handle_quiz_input, handle_start_input, quit_session, skip_question,
    submit_answer, tick, StartAction,
};
pub use ui::{draw_quiz, draw_start, draw_summary};
pub use utils::{decode_html, truncate_string};

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use interactive_trivia::{
    draw_quiz, draw_start, draw_summary, logger, session, spawn_provider_worker, AppState,
    ProviderRequest, ProviderResponse, QuizSession, StartAction, StartForm,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    logger::init();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (req_tx, req_rx) = crossbeam_channel::unbounded::<ProviderRequest>();
    let (resp_tx, resp_rx) = crossbeam_channel::unbounded::<ProviderResponse>();
    let _worker = spawn_provider_worker(resp_tx, req_rx);

    let mut app_state = AppState::Start;
    let mut start_form = StartForm::default();
    let mut quiz_session: Option<QuizSession> = None;
    let mut notice: Option<String> = None;

    loop {
        // Responses for a session the user already left are dropped.
        while let Ok(response) = resp_rx.try_recv() {
            if app_state != AppState::Loading {
                logger::log("dropping stale provider response");
                continue;
            }
            match response {
                ProviderResponse::Loaded { questions } => {
                    notice = None;
                    quiz_session = Some(session::begin_session(
                        questions,
                        &mut app_state,
                        Instant::now(),
                    ));
                }
                ProviderResponse::Failed { error } => {
                    notice = Some(format!("Could not load questions: {}", error));
                    app_state = AppState::Start;
                }
            }
        }

        let now = Instant::now();
        if app_state == AppState::Quiz
            && let Some(session) = &mut quiz_session
        {
            session::tick(session, &mut app_state, now);
        }

        terminal.draw(|f| match app_state {
            AppState::Start | AppState::Loading => draw_start(
                f,
                &start_form,
                notice.as_deref(),
                app_state == AppState::Loading,
            ),
            AppState::Quiz => {
                if let Some(session) = &quiz_session {
                    draw_quiz(f, session, now);
                }
            }
            AppState::Summary => {
                if let Some(session) = &quiz_session {
                    draw_summary(f, session);
                }
            }
        })?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }

                match app_state {
                    AppState::Start => match session::handle_start_input(&mut start_form, key) {
                        StartAction::Begin(config) => {
                            notice = None;
                            app_state = AppState::Loading;
                            req_tx.send(ProviderRequest::Fetch { config }).ok();
                        }
                        StartAction::Exit => break,
                        StartAction::None => {}
                    },
                    AppState::Loading => {
                        // A fetch is outstanding; further start requests are
                        // ignored until it resolves.
                    }
                    AppState::Quiz => {
                        if let Some(session) = &mut quiz_session {
                            session::handle_quiz_input(session, key, &mut app_state, now);
                        }
                    }
                    AppState::Summary => match key.code {
                        KeyCode::Char('r') | KeyCode::Enter => {
                            app_state = AppState::Start;
                        }
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        _ => {}
                    },
                }

                if app_state == AppState::Start {
                    quiz_session = None;
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

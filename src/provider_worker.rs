use crate::logger;
use crate::models::{ProviderRequest, ProviderResponse};
use crate::provider::TriviaClient;
use crossbeam_channel::{Receiver, Sender};
use std::thread;

/// Run the question fetches on their own thread so the UI loop never
/// blocks on the network. Requests come in over `req_rx`, results go back
/// over `resp_tx` and are drained by the event loop.
pub fn spawn_provider_worker(
    resp_tx: Sender<ProviderResponse>,
    req_rx: Receiver<ProviderRequest>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("interactive-trivia::provider".to_string())
        .spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            let client = TriviaClient::new();

            loop {
                match req_rx.recv() {
                    Ok(ProviderRequest::Fetch { config }) => {
                        logger::log(&format!(
                            "fetching {} questions, category {}, difficulty {}",
                            config.clamped_amount(),
                            config.category.label(),
                            config.difficulty.as_str()
                        ));

                        let result = rt.block_on(client.fetch_questions(&config));

                        match result {
                            Ok(questions) => {
                                logger::log(&format!("provider returned {} questions", questions.len()));
                                let _ = resp_tx.send(ProviderResponse::Loaded { questions });
                            }
                            Err(e) => {
                                logger::log(&format!("provider error: {}", e));
                                let _ = resp_tx.send(ProviderResponse::Failed {
                                    error: e.to_string(),
                                });
                            }
                        }
                    }
                    Err(_) => {
                        // Channel disconnected, exit worker
                        logger::log("provider channel disconnected, exiting");
                        break;
                    }
                }
            }
        })
        .expect("Failed to spawn provider worker thread")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_worker_exits_when_request_channel_closes() {
        let (resp_tx, _resp_rx) = unbounded();
        let (req_tx, req_rx) = unbounded::<ProviderRequest>();

        let handle = spawn_provider_worker(resp_tx, req_rx);
        drop(req_tx);

        handle.join().expect("worker thread joins cleanly");
    }
}

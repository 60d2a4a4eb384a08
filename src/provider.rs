use crate::models::Question;
use serde::Deserialize;
use thiserror::Error;

pub const API_BASE_URL: &str = "https://opentdb.com/api.php";

pub const MIN_AMOUNT: usize = 3;
pub const MAX_AMOUNT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    GeneralKnowledge,
    Computers,
    Sports,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::GeneralKnowledge,
        Category::Computers,
        Category::Sports,
    ];

    /// Open Trivia DB category id.
    pub fn id(&self) -> u32 {
        match self {
            Category::GeneralKnowledge => 9,
            Category::Computers => 18,
            Category::Sports => 21,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::GeneralKnowledge => "General Knowledge",
            Category::Computers => "Computers",
            Category::Sports => "Sports",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchConfig {
    pub category: Category,
    pub difficulty: Difficulty,
    pub amount: usize,
}

impl FetchConfig {
    /// The form already bounds the amount, but the request never trusts
    /// its caller with it.
    pub fn clamped_amount(&self) -> usize {
        self.amount.clamp(MIN_AMOUNT, MAX_AMOUNT)
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("trivia API returned response code {0}")]
    Api(u8),
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<Question>,
}

#[derive(Debug, Clone)]
pub struct TriviaClient {
    client: reqwest::Client,
    base_url: String,
}

impl TriviaClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: API_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    fn request_url(&self, config: &FetchConfig) -> String {
        format!(
            "{}?amount={}&category={}&difficulty={}&type=multiple",
            self.base_url,
            config.clamped_amount(),
            config.category.id(),
            config.difficulty.as_str()
        )
    }

    /// Fetch one batch of questions. A non-zero API response code is a
    /// failure, an empty result set with code 0 is not.
    pub async fn fetch_questions(
        &self,
        config: &FetchConfig,
    ) -> Result<Vec<Question>, ProviderError> {
        let url = self.request_url(config);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let payload: TriviaResponse = response.json().await?;

        match payload.response_code {
            0 => Ok(payload.results),
            code => Err(ProviderError::Api(code)),
        }
    }
}

impl Default for TriviaClient {
    fn default() -> Self {
        Self::new()
    }
}

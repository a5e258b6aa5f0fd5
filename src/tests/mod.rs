use crate::ai::{AIError, ChatBackend, GenerationClient};
use crate::config::Config;
use crate::session::Session;
use crate::shell::ShellType;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

mod dispatch;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// In-memory backend answering from a per-model script.
///
/// Models without a scripted reply fail with an API error.
pub(crate) struct ScriptedBackend {
    listing: Result<Vec<String>, AIError>,
    replies: HashMap<String, Result<String, AIError>>,
    calls: Mutex<Vec<RecordedCall>>,
    listings: Mutex<usize>,
}

impl ScriptedBackend {
    pub fn new(models: &[&str]) -> Self {
        Self {
            listing: Ok(models.iter().map(|m| m.to_string()).collect()),
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            listings: Mutex::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            listing: Err(AIError::NetworkError("connection refused".to_string())),
            ..Self::new(&[])
        }
    }

    pub fn reply(mut self, model: &str, text: &str) -> Self {
        self.replies.insert(model.to_string(), Ok(text.to_string()));
        self
    }

    pub fn fail(mut self, model: &str, error: AIError) -> Self {
        self.replies.insert(model.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listings(&self) -> usize {
        *self.listings.lock().unwrap()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn list_models(&self) -> Result<Vec<String>, AIError> {
        *self.listings.lock().unwrap() += 1;
        self.listing.clone()
    }

    async fn complete(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, AIError> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            max_tokens,
            temperature,
        });
        self.replies
            .get(model)
            .cloned()
            .unwrap_or_else(|| Err(AIError::APIError(format!("{} is not scripted", model))))
    }
}

pub(crate) struct TestUtils;

impl TestUtils {
    pub fn client(backend: ScriptedBackend) -> GenerationClient<ScriptedBackend> {
        GenerationClient::new(backend, vec!["fallback-a".to_string(), "fallback-b".to_string()])
    }

    pub fn session(backend: ScriptedBackend) -> Session<ScriptedBackend> {
        Session::new(
            Config::with_api_key("test_key"),
            Self::client(backend),
            ShellType::detect(),
        )
    }
}

use async_trait::async_trait;
use nomad_backend::{
    Error, Result,
    images::{ImageHit, ImageSearch},
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient},
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// Mock LLM client replaying scripted replies in order.
///
/// `Err` entries become upstream generation failures.
#[derive(Debug, Default)]
pub struct MockLlmClient {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn with_error(self, error: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Err(error.into()));
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the last user message of every request, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.get_requests()
            .iter()
            .filter_map(|r| r.messages.last().map(|m| m.content.clone()))
            .collect()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("No more mock responses available".to_string()));

        match reply {
            Ok(text) => Ok(ChatCompletionResponse {
                id: "chatcmpl-mock".to_string(),
                model: "mock-model".to_string(),
                choices: vec![Choice {
                    index: 0,
                    message: ChatMessage::assistant(text),
                    finish_reason: Some("Stop".to_string()),
                }],
                usage: None,
            }),
            Err(e) => Err(Error::generation(e)),
        }
    }
}

/// Mock image search: known terms resolve to a fixed hit, failing terms
/// return an upstream error, everything else finds nothing.
#[derive(Debug, Default)]
pub struct MockImageSearch {
    hits: HashMap<String, ImageHit>,
    failing: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl MockImageSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(self, term: &str) -> Self {
        let slug = term.to_lowercase().replace(' ', "-");
        self.with_hit_at(term, &format!("https://images.example/{}.jpg", slug))
    }

    pub fn with_hit_at(mut self, term: &str, url: &str) -> Self {
        self.hits.insert(
            term.to_string(),
            ImageHit {
                url: url.to_string(),
                attribution_name: "Jane Doe".to_string(),
            },
        );
        self
    }

    pub fn with_failure(mut self, term: &str) -> Self {
        self.failing.insert(term.to_string());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSearch for MockImageSearch {
    async fn search(&self, query: &str) -> Result<Option<ImageHit>> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.failing.contains(query) {
            return Err(Error::upstream(Some(500), format!("search failed for {}", query)));
        }
        Ok(self.hits.get(query).cloned())
    }
}

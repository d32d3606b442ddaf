// Summarization model seam. One provider (Ollama-compatible HTTP backend)
// behind an object-safe trait so handlers and tests never depend on a live
// model server.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::chunker::chunk_text;
use crate::error::AppError;

/// Fixed decoding constraints applied to every chunk: bounded output
/// length and greedy, non-sampling decoding.
#[derive(Debug, Clone, Copy)]
pub struct GenerationConstraints {
    pub max_new_tokens: u32,
    pub min_new_tokens: u32,
}

impl Default for GenerationConstraints {
    fn default() -> Self {
        Self {
            max_new_tokens: 130,
            min_new_tokens: 30,
        }
    }
}

impl GenerationConstraints {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: u32| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };
        Self {
            max_new_tokens: read("SUMMARY_MAX_TOKENS", defaults.max_new_tokens),
            min_new_tokens: read("SUMMARY_MIN_TOKENS", defaults.min_new_tokens),
        }
    }
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("model connection failed: {0}")]
    ConnectionFailed(String),
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

/// A pretrained summarization model.
///
/// Implementations are constructed once at startup, are immutable after
/// construction, and must be safe for concurrent read-only use across
/// request workers.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces a summary of one chunk of text.
    async fn summarize_chunk(&self, text: &str) -> Result<String, SummarizeError>;
    fn model_name(&self) -> &str;
}

/// Summarizer backed by an Ollama-compatible inference server.
pub struct OllamaSummarizer {
    url: String,
    model: String,
    constraints: GenerationConstraints,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct OllamaOptions {
    /// Zero temperature gives deterministic greedy decoding.
    temperature: f32,
    num_predict: i32,
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl OllamaSummarizer {
    pub fn new(url: String, model: String, constraints: GenerationConstraints) -> Self {
        Self {
            url,
            model,
            constraints,
            client: reqwest::Client::new(),
        }
    }

    pub async fn health_check(&self) -> Result<(), SummarizeError> {
        let health_url = format!("{}/api/tags", self.url);
        self.client.get(&health_url).send().await.map_err(|e| {
            SummarizeError::ConnectionFailed(format!(
                "cannot reach model server at {}: {}",
                self.url, e
            ))
        })?;
        Ok(())
    }

    // The backend has no native minimum-length option, so the floor rides
    // in the instruction while num_predict enforces the ceiling.
    fn prompt_for(&self, text: &str) -> String {
        format!(
            "Summarize the following text in at least {} words. \
             Reply with the summary only.\n\n{}",
            self.constraints.min_new_tokens, text
        )
    }
}

#[async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize_chunk(&self, text: &str) -> Result<String, SummarizeError> {
        debug!(
            model = %self.model,
            chunk_len = text.len(),
            max_new_tokens = self.constraints.max_new_tokens,
            "requesting summary"
        );

        let req = OllamaRequest {
            model: self.model.clone(),
            prompt: self.prompt_for(text),
            stream: false,
            options: OllamaOptions {
                temperature: 0.0,
                num_predict: self.constraints.max_new_tokens as i32,
            },
        };

        let url = format!("{}/api/generate", self.url);
        let response = self
            .client
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| SummarizeError::ConnectionFailed(e.to_string()))?;

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::InvalidResponse(e.to_string()))?;

        let summary = body.response.trim().to_string();
        if summary.is_empty() {
            return Err(SummarizeError::GenerationFailed(
                "model returned no text".to_string(),
            ));
        }
        Ok(summary)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Chunks `text` and summarizes each chunk in order, joining the per-chunk
/// summaries with newlines. The first failing chunk aborts the whole call;
/// no partial summary is returned.
pub async fn summarize_document(
    model: &dyn Summarizer,
    text: &str,
    max_chunk: usize,
) -> Result<String, AppError> {
    let chunks = chunk_text(text, max_chunk);
    info!(
        chunks = chunks.len(),
        max_chunk,
        model = model.model_name(),
        "summarizing document"
    );

    let mut summaries = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        debug!(chunk = i + 1, total = chunks.len(), "summarizing chunk");
        let summary = model
            .summarize_chunk(chunk)
            .await
            .map_err(|source| AppError::Summarize {
                chunk: i + 1,
                source,
            })?;
        summaries.push(summary);
    }
    Ok(summaries.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records its inputs and answers with a numbered summary, failing on
    /// one configured call if asked to.
    struct ScriptedModel {
        calls: AtomicUsize,
        inputs: Mutex<Vec<String>>,
        fail_on_call: Option<usize>,
    }

    impl ScriptedModel {
        fn new(fail_on_call: Option<usize>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                inputs: Mutex::new(Vec::new()),
                fail_on_call,
            }
        }
    }

    #[async_trait]
    impl Summarizer for ScriptedModel {
        async fn summarize_chunk(&self, text: &str) -> Result<String, SummarizeError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.inputs.lock().unwrap().push(text.to_string());
            if self.fail_on_call == Some(call) {
                return Err(SummarizeError::GenerationFailed("boom".to_string()));
            }
            Ok(format!("summary-{call}"))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn summaries_join_in_chunk_order() {
        let model = ScriptedModel::new(None);
        let text = "a".repeat(25);
        let joined = summarize_document(&model, &text, 10).await.unwrap();
        assert_eq!(joined, "summary-1\nsummary-2\nsummary-3");
        let inputs = model.inputs.lock().unwrap();
        assert_eq!(inputs.concat(), text);
    }

    #[tokio::test]
    async fn single_chunk_text_gets_one_model_call() {
        let model = ScriptedModel::new(None);
        let joined = summarize_document(&model, "short text", 1000).await.unwrap();
        assert_eq!(joined, "summary-1");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_on_second_chunk_aborts_without_partial_output() {
        let model = ScriptedModel::new(Some(2));
        let text = "b".repeat(30);
        let err = summarize_document(&model, &text, 10).await.unwrap_err();
        match err {
            AppError::Summarize { chunk, .. } => assert_eq!(chunk, 2),
            other => panic!("unexpected error: {other}"),
        }
        // The third chunk was never attempted.
        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn default_constraints() {
        let c = GenerationConstraints::default();
        assert_eq!(c.max_new_tokens, 130);
        assert_eq!(c.min_new_tokens, 30);
    }

    #[test]
    fn prompt_carries_the_minimum_length_floor() {
        let model = OllamaSummarizer::new(
            "http://localhost:11434".to_string(),
            "phi:latest".to_string(),
            GenerationConstraints::default(),
        );
        let prompt = model.prompt_for("body");
        assert!(prompt.contains("at least 30"));
        assert!(prompt.ends_with("body"));
        assert_eq!(model.model_name(), "phi:latest");
    }
}

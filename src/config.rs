// src/config.rs
use std::env;
use std::path::PathBuf;

use crate::chunker::DEFAULT_MAX_CHUNK;
use crate::summarizer::GenerationConstraints;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding uploads for the duration of a single request.
    pub upload_dir: PathBuf,
    /// Maximum characters per chunk handed to the model in one call.
    pub max_chunk: usize,
    /// Base URL of the Ollama-compatible inference server.
    pub model_url: String,
    pub model_name: String,
    pub constraints: GenerationConstraints,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let host = env::var("PRECIS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PRECIS_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .expect("PRECIS_PORT must be a valid u16");
        let upload_dir = env::var("PRECIS_UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string())
            .into();
        let max_chunk = env::var("PRECIS_MAX_CHUNK")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_MAX_CHUNK);
        let model_url =
            env::var("OLLAMA_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());
        let model_name = env::var("SUMMARY_MODEL").unwrap_or_else(|_| "phi:latest".to_string());
        let constraints = GenerationConstraints::from_env();
        Self {
            host,
            port,
            upload_dir,
            max_chunk,
            model_url,
            model_name,
            constraints,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub mod api;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod summarizer;
pub mod upload;

pub use config::Config;
pub use error::AppError;
pub use summarizer::Summarizer;

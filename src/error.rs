use thiserror::Error;

use crate::summarizer::SummarizeError;

/// Everything that can fail between a submission and a rendered summary.
///
/// Display strings double as the user-facing messages carried on the
/// redirect back to the input form; keep them readable.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please provide text or upload a file.")]
    EmptyInput,

    #[error("Unsupported file type '{0}'; only .txt and .pdf are accepted.")]
    UnsupportedFileType(String),

    #[error("No valid text to summarize.")]
    BlankText,

    #[error("Failed to store upload: {0}")]
    Upload(#[from] std::io::Error),

    #[error("Error reading PDF: {0}")]
    Pdf(String),

    #[error("Error reading text file: {0}")]
    TextFile(String),

    #[error("Error summarizing chunk {chunk}: {source}")]
    Summarize {
        chunk: usize,
        #[source]
        source: SummarizeError,
    },
}

use std::sync::Arc;

use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, App, HttpResponse, HttpServer};
use futures_util::stream::StreamExt;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::extract::{self, DocumentKind};
use crate::middleware::RequestId;
use crate::summarizer::{summarize_document, Summarizer};
use crate::upload::SavedUpload;

pub mod pages;

/// Handle to the process-wide summarization model. Constructed once in
/// `main`, injected into handlers, never mutated afterwards.
pub type SharedSummarizer = Arc<dyn Summarizer>;

/// One multipart submission, reduced to the two fields the form carries.
struct Submission {
    text_input: Option<String>,
    file: Option<(String, Vec<u8>)>,
}

#[derive(serde::Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
}

pub async fn index(query: web::Query<IndexQuery>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::index_page(query.error.as_deref()))
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Sends the user back to the form with a one-shot message in the query
/// string. The service is sessionless, so the flash rides the redirect.
fn flash_redirect(message: &str) -> HttpResponse {
    let encoded = utf8_percent_encode(message, NON_ALPHANUMERIC).to_string();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/?error={encoded}")))
        .finish()
}

async fn read_submission(mut payload: Multipart) -> Result<Submission, actix_web::Error> {
    let mut text_input = None;
    let mut file = None;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().unwrap_or("").to_string(),
                cd.get_filename().map(str::to_string),
            ),
            None => (String::new(), None),
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            data.extend_from_slice(&chunk?);
        }

        match name.as_str() {
            "text_input" => {
                let text = String::from_utf8(data)
                    .map_err(actix_web::error::ErrorBadRequest)?;
                if !text.is_empty() {
                    text_input = Some(text);
                }
            }
            "file_input" => {
                // Browsers send an empty file part when nothing was picked.
                if let Some(filename) = filename.filter(|f| !f.is_empty()) {
                    file = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    Ok(Submission { text_input, file })
}

/// POST / — the whole submit → extract → chunk → summarize → render flow.
/// Any failure becomes a flashed message on a redirect back to the form.
pub async fn submit(
    payload: Multipart,
    config: web::Data<Config>,
    model: web::Data<SharedSummarizer>,
) -> Result<HttpResponse, actix_web::Error> {
    let submission = read_submission(payload).await?;
    match process(submission, &config, model.get_ref().as_ref()).await {
        Ok(summary) => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(pages::result_page(&summary))),
        Err(err) => {
            warn!(error = %err, "submission failed");
            Ok(flash_redirect(&err.to_string()))
        }
    }
}

async fn process(
    submission: Submission,
    config: &Config,
    model: &dyn Summarizer,
) -> Result<String, AppError> {
    let text = match submission.file {
        Some((filename, bytes)) => {
            let kind = DocumentKind::from_filename(&filename)
                .ok_or_else(|| AppError::UnsupportedFileType(filename.clone()))?;
            extract_upload(config, filename, bytes, kind).await?
        }
        None => submission.text_input.ok_or(AppError::EmptyInput)?,
    };

    if text.trim().is_empty() {
        return Err(AppError::BlankText);
    }

    summarize_document(model, &text, config.max_chunk).await
}

/// Saves the upload, extracts its text, and removes the file before
/// returning. The `SavedUpload` guard deletes on drop, so the file is gone
/// even when extraction errors out.
async fn extract_upload(
    config: &Config,
    filename: String,
    bytes: Vec<u8>,
    kind: DocumentKind,
) -> Result<String, AppError> {
    let upload_dir = config.upload_dir.clone();
    let saved = web::block(move || SavedUpload::write(&upload_dir, &filename, &bytes))
        .await
        .map_err(|e| AppError::Upload(std::io::Error::other(e)))??;

    let path = saved.path().to_path_buf();
    let text = web::block(move || extract::extract(&path, kind))
        .await
        .map_err(|e| AppError::Upload(std::io::Error::other(e)))??;

    drop(saved);
    Ok(text)
}

pub async fn start_api_server(config: Config, model: SharedSummarizer) -> std::io::Result<()> {
    let bind_addr = config.bind_addr();
    let config = web::Data::new(config);
    let model = web::Data::new(model);

    info!(addr = %bind_addr, "starting server");
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(config.clone())
            .app_data(model.clone())
            .wrap(cors)
            .wrap(RequestId)
            .route("/", web::get().to(index))
            .route("/", web::post().to(submit))
            .route("/health", web::get().to(health_check))
    })
    .bind(bind_addr)?
    .run()
    .await
}

use std::fs;
use std::sync::Arc;

use precis::api::{start_api_server, SharedSummarizer};
use precis::config::Config;
use precis::summarizer::{OllamaSummarizer, Summarizer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    // Uploads only live here for the duration of a request.
    fs::create_dir_all(&config.upload_dir)?;

    let model = OllamaSummarizer::new(
        config.model_url.clone(),
        config.model_name.clone(),
        config.constraints,
    );
    if let Err(e) = model.health_check().await {
        warn!(error = %e, "model server unreachable; submissions will fail until it is up");
    }
    info!(
        model = model.model_name(),
        addr = %config.bind_addr(),
        max_chunk = config.max_chunk,
        "summarizer ready"
    );

    let model: SharedSummarizer = Arc::new(model);
    start_api_server(config, model).await
}

use crate::chat_log::ChatLog;
use crate::completion::CompletionClient;
use crate::constants::*;
use crate::types::UpstreamHealth;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
    #[arg(long, default_value = DEFAULT_CHAT_LOG)]
    pub chat_log: PathBuf,
    #[arg(long, default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
    #[arg(long, default_value_t = DEFAULT_MAX_BODY_SIZE)]
    pub max_body_size: usize,
}

/// Everything the relay needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub chat_log_path: PathBuf,
    pub public_dir: PathBuf,
    pub max_body_size: usize,
}

impl RelayConfig {
    pub fn from_args(args: &Args, api_key: String) -> Self {
        Self {
            api_key,
            api_base: args.api_base.clone(),
            model: args.model.clone(),
            chat_log_path: args.chat_log.clone(),
            public_dir: args.public_dir.clone(),
            max_body_size: args.max_body_size,
        }
    }

    pub fn completions_url(&self) -> String {
        format!(
            "{}{}",
            self.api_base.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }
}

pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub completion: CompletionClient,
    pub chat_log: ChatLog,
    pub health: UpstreamHealth,
}

impl AppState {
    pub fn new(config: RelayConfig, client: reqwest::Client) -> Self {
        let config = Arc::new(config);
        Self {
            completion: CompletionClient::new(client, &config),
            chat_log: ChatLog::new(&config),
            health: UpstreamHealth::default(),
            config,
        }
    }
}

/// `/chat` and the health probes, the log file as a read-only static file,
/// and the public directory for everything else.
pub fn build_router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();

    Router::new()
        .route("/chat", post(crate::engine::chat_handler))
        .route("/health", get(crate::health::liveness))
        .route("/readyz", get(crate::health::readiness))
        .route_service("/chat-log.json", ServeFile::new(&config.chat_log_path))
        .fallback_service(ServeDir::new(&config.public_dir))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(middleware::from_fn(crate::logging::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

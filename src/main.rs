use clap::Parser;
use std::sync::Arc;
use tracing_appender::rolling::{Builder, Rotation};
use xps_relay::constants::{OPERATOR_LOG_MAX_FILES, OPERATOR_LOG_PREFIX};
use xps_relay::main_helper::{build_router, RelayConfig};
use xps_relay::{AppState, Args};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    use tracing_subscriber::prelude::*;

    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => "xps_relay=debug,chat_relay=info,tower_http=info".into(),
    };

    // Daily operator log, oldest files pruned by the appender itself
    if let Err(e) = std::fs::create_dir_all(&args.log_dir) {
        eprintln!("Failed to create log directory {}: {}", args.log_dir.display(), e);
        std::process::exit(1);
    }
    let file_appender = match Builder::new()
        .rotation(Rotation::DAILY)
        .filename_prefix(OPERATOR_LOG_PREFIX)
        .max_log_files(OPERATOR_LOG_MAX_FILES)
        .build(&args.log_dir)
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Failed to open log directory {}: {}", args.log_dir.display(), e);
            std::process::exit(1);
        }
    };
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    xps_relay::logging::setup_panic_hook();

    let api_key = match std::env::var("OPENAI_API_KEY") {
        Ok(k) if !k.is_empty() => k,
        _ => {
            eprintln!("Error: OPENAI_API_KEY environment variable is missing or empty.");
            eprintln!("Please set it in your .env file or environment.");
            std::process::exit(1);
        }
    };

    let client = match reqwest::Client::builder().build() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let config = RelayConfig::from_args(&args, api_key);
    tracing::info!(
        "Relaying to {} with model {}",
        config.completions_url(),
        config.model
    );

    if !config.public_dir.is_dir() {
        tracing::warn!(
            "Public directory {} does not exist; static assets will 404",
            config.public_dir.display()
        );
    }

    let state = Arc::new(AppState::new(config, client));

    match state.chat_log.entries().await {
        Ok(entries) => tracing::info!(
            "Chat log {} holds {} records",
            state.chat_log.path().display(),
            entries.len()
        ),
        Err(e) => tracing::warn!(
            "Chat log {} could not be read: {}",
            state.chat_log.path().display(),
            e.inner
        ),
    }

    let app = build_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("AI chatbot server is running on http://{}", addr);

    use futures_util::FutureExt;
    let server_future = async move { axum::serve(listener, app).await };

    match std::panic::AssertUnwindSafe(server_future)
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
        Err(panic_payload) => {
            let message = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                *s
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.as_str()
            } else {
                "Unknown panic"
            };
            tracing::error!(target: "panic", "CRITICAL: Server task panicked: {}", message);
            std::process::exit(1);
        }
    }
}

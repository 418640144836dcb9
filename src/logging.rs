use crate::constants::REQUEST_ID_HEADER;
use axum::{
    body::Body,
    http::{HeaderValue, Request, Response},
    middleware::Next,
};
use std::panic;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

const PREVIEW_CHARS: usize = 48;

/// Sets up a global panic hook that logs panics using tracing.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let backtrace = std::backtrace::Backtrace::capture();

        let payload = panic_info.payload();
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            *s
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.as_str()
        } else {
            "Unknown panic payload"
        };

        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        error!(
            target: "panic",
            message = %message,
            location = %location,
            backtrace = %backtrace,
            "FATAL: Application panicked"
        );

        original_hook(panic_info);
    }));
}

/// Tags every request with a UUID, visible to handlers as a request header
/// and to callers as a response header.
pub async fn request_id_middleware(mut req: Request<Body>, next: Next) -> Response<Body> {
    let request_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&request_id).ok();
    if let Some(val) = header.clone() {
        req.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    let span = info_span!("request", request_id = %request_id);
    let mut response = next.run(req).instrument(span).await;
    if let Some(val) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}

/// Returns at most `max_chars` characters, respecting UTF-8 boundaries.
pub fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub fn log_request_summary(message: &str) {
    info!(
        target: "chat_relay",
        "[REQ] Chars: {} | Preview: {:?}",
        message.chars().count(),
        preview(message, PREVIEW_CHARS)
    );
}

pub fn log_reply_summary(reply: &str, reply_html: &str) {
    let shape = if reply.contains("<li>") {
        "LIST_MARKUP"
    } else if reply.is_empty() {
        "EMPTY"
    } else {
        "TEXT"
    };

    info!(
        target: "chat_relay",
        "[RES] Shape: {} | Reply: {} chars | Html: {} chars",
        shape,
        reply.chars().count(),
        reply_html.chars().count()
    );
}

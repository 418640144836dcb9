use crate::chat_log::ChatLog;
use crate::constants::REQUEST_ID_HEADER;
use crate::format::to_html_with_step_breaks;
use crate::logging::{log_reply_summary, log_request_summary};
use crate::main_helper::AppState;
use crate::types::*;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// `POST /chat`: completion, formatting, then a best-effort log append.
#[tracing::instrument(
    name = "relay.chat",
    skip_all,
    fields(
        request_id = tracing::field::Empty,
        model = tracing::field::Empty,
        http.status = tracing::field::Empty,
        relay.outcome = tracing::field::Empty,
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let span = tracing::Span::current();
    if let Some(rid) = headers.get(REQUEST_ID_HEADER).and_then(|h| h.to_str().ok()) {
        span.record("request_id", rid);
    }
    span.record("model", state.completion.model());

    let result = match payload {
        Ok(Json(request)) => relay_chat(&state, &request).await,
        Err(rejection) => {
            Err(RelayError::BadBody(rejection.status(), rejection.body_text()).into())
        }
    };

    let response = match result {
        Ok(reply) => {
            span.record("relay.outcome", "success");
            Json(reply).into_response()
        }
        Err(e) => {
            match &e.inner {
                RelayError::Validation(reason) | RelayError::BadBody(_, reason) => {
                    span.record("relay.outcome", "client_error");
                    tracing::warn!("[CHAT] Rejected request: {}", reason);
                }
                inner if inner.is_upstream() => {
                    span.record("relay.outcome", "upstream_error");
                    tracing::error!("[CHAT] Completion failed ({}): {}", inner.code(), e);
                }
                inner => {
                    span.record("relay.outcome", "internal_error");
                    tracing::error!("[CHAT] Request failed ({}): {}", inner.code(), e);
                }
            }
            e.into_response()
        }
    };

    span.record("http.status", response.status().as_u16());
    response
}

/// Runs one chat turn. The log append happens only after the reply exists and
/// its failure is reported, never returned.
pub async fn relay_chat(state: &AppState, request: &ChatRequest) -> Result<ChatReply> {
    let message = request.validated_message()?;
    log_request_summary(message);

    let reply = match state.completion.complete(message).await {
        Ok(text) => {
            state.health.record_success();
            text
        }
        Err(e) => {
            state.health.record_failure();
            return Err(e);
        }
    };

    let reply_html = to_html_with_step_breaks(&reply);
    log_reply_summary(&reply, &reply_html);

    if let Err(e) = record_chat(&state.chat_log, LogEntry::now(message, reply.as_str())).await {
        tracing::warn!(
            "[LOG] Failed to append to {}: {}",
            state.chat_log.path().display(),
            e.inner
        );
    }

    Ok(ChatReply { reply, reply_html })
}

async fn record_chat(chat_log: &ChatLog, entry: LogEntry) -> Result<()> {
    chat_log.append(&entry).await?;
    tracing::debug!("[LOG] Appended chat record at {}", entry.timestamp);
    Ok(())
}

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::header,
    response::Response,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::providers::openai::{OpenAIProvider, speech_payload};
use crate::server::AppState;
use crate::server::handlers::json_object_body;
use crate::server::credentials::{credential_source_label, resolve_credential, take_api_key};
use crate::server::request_logging::{REQ_TYPE_SPEECH, log_forward_request};

const PATH: &str = "/api/audio/speech";

pub async fn create_speech(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let start_time = Utc::now();
    let mut body = json_object_body(&body)?;

    let caller_key = take_api_key(&mut body);
    let credential = resolve_credential(
        caller_key.as_deref(),
        app_state.config.secrets.openai_api_key.as_deref(),
    );
    let credential_label = credential_source_label(credential.as_ref());

    let model = app_state.config.models.speech.as_str();
    if let Some(requested) = body.get("model").and_then(Value::as_str)
        && requested != model
    {
        tracing::debug!(requested, pinned = model, "caller speech model ignored");
    }
    let payload = speech_payload(body, model);

    let upstream = match OpenAIProvider::create_speech(
        &app_state.http,
        &app_state.config.upstream.openai_base_url,
        credential.as_ref().map(|c| c.key()),
        &payload,
    )
    .await
    {
        Ok(r) => r,
        Err(e) => {
            log_forward_request(
                start_time,
                "POST",
                PATH,
                REQ_TYPE_SPEECH,
                Some(model),
                credential_label,
                500,
                Some(e.to_string()),
            );
            return Err(e);
        }
    };

    log_forward_request(
        start_time,
        "POST",
        PATH,
        REQ_TYPE_SPEECH,
        Some(model),
        credential_label,
        upstream.status().as_u16(),
        None,
    );
    Ok(relay_audio(upstream))
}

// 音频原样透传：状态码、Content-Type 与字节流都来自上游
fn relay_audio(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let stream = upstream
        .bytes_stream()
        .inspect_err(|e| tracing::warn!("upstream audio stream aborted: {}", e));

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    response
}

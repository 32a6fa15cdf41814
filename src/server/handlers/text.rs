use axum::{Json, body::Bytes, extract::State};
use chrono::Utc;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::providers::openai::{OpenAIProvider, output_text, responses_payload};
use crate::server::AppState;
use crate::server::handlers::json_object_body;
use crate::server::credentials::{credential_source_label, resolve_credential, take_api_key};
use crate::server::request_logging::{REQ_TYPE_TEXT_COMPLETION, log_forward_request};

const PATH: &str = "/api/text/completions";

/// Answers with the reply's output text as a bare JSON string.
pub async fn create_text_completion(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<String>, GatewayError> {
    let start_time = Utc::now();
    let mut body = json_object_body(&body)?;

    let caller_key = take_api_key(&mut body);
    let credential = resolve_credential(
        caller_key.as_deref(),
        app_state.config.secrets.openai_api_key.as_deref(),
    );
    let credential_label = credential_source_label(credential.as_ref());

    let model = app_state.config.models.text.as_str();
    let payload = responses_payload(body, model);

    let reply = OpenAIProvider::create_response(
        &app_state.http,
        &app_state.config.upstream.openai_base_url,
        credential.as_ref().map(|c| c.key()),
        &payload,
    )
    .await;

    let (status_code, error_message) = match &reply {
        Ok(_) => (200, None),
        Err(e) => (500, Some(e.to_string())),
    };
    log_forward_request(
        start_time,
        "POST",
        PATH,
        REQ_TYPE_TEXT_COMPLETION,
        Some(model),
        credential_label,
        status_code,
        error_message,
    );

    let reply = reply?;
    Ok(Json(output_text(&reply)))
}

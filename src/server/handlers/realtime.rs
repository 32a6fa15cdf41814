use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;

use crate::error::GatewayError;
use crate::providers::openai::{ClientSecretRequest, OpenAIProvider};
use crate::server::AppState;
use crate::server::credentials::{credential_source_label, resolve_credential};
use crate::server::request_logging::{REQ_TYPE_REALTIME_CLIENT_SECRET, log_forward_request};

const PATH: &str = "/api/realtime/client_secrets";
const FAILURE_PREFIX: &str = "Failed to get client secrets, ";

/// The only route that translates failures itself. Every variant answers 500
/// with `{"error": "Failed to get client secrets, <detail>"}`.
#[derive(Debug, Error)]
pub enum ClientSecretFailure {
    /// Upstream replied 2xx but not with `{value: string, expires_at: number}`.
    #[error("{0}")]
    Validation(String),
    /// Upstream rejected the call, or could not be reached.
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Unknown(String),
}

impl From<GatewayError> for ClientSecretFailure {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Validation(detail) => Self::Validation(detail),
            GatewayError::Upstream {
                message: Some(message),
                ..
            } => Self::Upstream(message),
            GatewayError::Upstream {
                status,
                message: None,
            } => Self::Upstream(format!("Request failed with status code {}", status)),
            GatewayError::Http(e) => Self::Upstream(e.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl IntoResponse for ClientSecretFailure {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": format!("{}{}", FAILURE_PREFIX, self) });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Issues an ephemeral realtime token with the server's own key. The payload
/// is fixed; nothing from the inbound request is used.
pub async fn client_secrets(
    State(app_state): State<Arc<AppState>>,
) -> Result<String, ClientSecretFailure> {
    let start_time = Utc::now();
    let models = &app_state.config.models;

    // 此路由不支持调用方覆盖密钥
    let credential = resolve_credential(None, app_state.config.secrets.openai_api_key.as_deref());
    let request = ClientSecretRequest::new(&models.realtime, &models.realtime_instructions);

    let reply = OpenAIProvider::create_client_secret(
        &app_state.http,
        &app_state.config.upstream.openai_base_url,
        credential.as_ref().map(|c| c.key()),
        &request,
    )
    .await
    .map_err(ClientSecretFailure::from);

    let (status_code, error_message) = match &reply {
        Ok(_) => (200, None),
        Err(e) => (500, Some(e.to_string())),
    };
    log_forward_request(
        start_time,
        "GET",
        PATH,
        REQ_TYPE_REALTIME_CLIENT_SECRET,
        Some(models.realtime.as_str()),
        credential_source_label(credential.as_ref()),
        status_code,
        error_message,
    );

    Ok(reply?.value)
}

use axum::{
    Router,
    routing::{get, post},
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::server::AppState;

mod audio;
mod clerk;
mod health;
mod realtime;
mod text;

pub use realtime::ClientSecretFailure;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        // Identity provider directory (pass-through)
        .route("/api/clerk/users", get(clerk::list_users))
        .route("/api/clerk/user/{userId}", get(clerk::get_user))
        // OpenAI forwarding
        .route("/api/audio/speech", post(audio::create_speech))
        .route(
            "/api/realtime/client_secrets",
            get(realtime::client_secrets),
        )
        .route("/api/text/completions", post(text::create_text_completion))
}

/// 浏览器 fetch 不设置头时发送 text/plain，因此不校验 Content-Type，
/// 只要求请求体是 JSON 对象
pub(crate) fn json_object_body(bytes: &[u8]) -> Result<Map<String, Value>, GatewayError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(GatewayError::BadRequest("request body must be a JSON object".into())),
        Err(e) => Err(GatewayError::BadRequest(format!("invalid JSON body: {}", e))),
    }
}

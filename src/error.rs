use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Upstream error ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Upstream { status: u16, message: Option<String> },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl GatewayError {
    /// Builds an `Upstream` error from a non-2xx reply, keeping the
    /// provider's `error.message` when the body carries one.
    pub fn from_upstream_body(status: reqwest::StatusCode, body: &[u8]) -> Self {
        Self::Upstream {
            status: status.as_u16(),
            message: upstream_error_message(body),
        }
    }
}

/// OpenAI 风格错误体：`{"error": {"message": "..."}}`
pub fn upstream_error_message(body: &[u8]) -> Option<String> {
    let v: serde_json::Value = serde_json::from_slice(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

// 非 realtime 路由不做错误翻译：统一 500，细节只进日志，避免把上游内容或密钥泄露给调用方
// 唯一例外是调用方自己的请求体无法解析，返回 400
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        if let GatewayError::BadRequest(detail) = &self {
            tracing::warn!(error = %detail, "rejected request body");
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

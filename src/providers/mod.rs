pub mod clerk;
pub mod openai;

pub use clerk::ClerkProvider;
pub use openai::OpenAIProvider;

use reqwest::{RequestBuilder, Response};

use crate::error::GatewayError;

// 没有凭据时不带 Authorization 头，由上游返回鉴权错误
pub(crate) fn with_bearer(builder: RequestBuilder, api_key: Option<&str>) -> RequestBuilder {
    match api_key {
        Some(key) => builder.bearer_auth(key),
        None => builder,
    }
}

/// Passes 2xx replies through; anything else becomes `GatewayError::Upstream`.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(GatewayError::from_upstream_body(status, &body))
}

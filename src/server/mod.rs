pub mod credentials;
pub mod handlers;
pub(crate) mod request_logging;
#[cfg(test)]
pub(crate) mod test_support;

use crate::config::Settings;
use crate::error::Result as AppResult;
use crate::http_client::build_client;
use axum::Router;
use std::sync::Arc;

/// Shared, read-only per-process state. Nothing in here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Settings,
    pub http: reqwest::Client,
}

pub async fn create_app(config: Settings) -> AppResult<Router> {
    let http = build_client(config.upstream_timeout())?;
    tracing::info!(
        openai = %config.upstream.openai_base_url,
        clerk = %config.upstream.clerk_base_url,
        speech_model = %config.models.speech,
        text_model = %config.models.text,
        "Upstreams configured"
    );

    let app_state = AppState { config, http };
    let mut app = handlers::routes().with_state(Arc::new(app_state));

    // CORS：浏览器直接调用本服务，反射请求来源
    use axum::http::{Method, header};
    use tower_http::cors::{AllowOrigin, CorsLayer};
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true);
    app = app
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    Ok(app)
}

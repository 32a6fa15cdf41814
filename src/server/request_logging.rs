use chrono::{DateTime, Utc};

// 请求类型常量，便于按类型检索日志
pub const REQ_TYPE_SPEECH: &str = "audio_speech";
pub const REQ_TYPE_TEXT_COMPLETION: &str = "text_completion";
pub const REQ_TYPE_REALTIME_CLIENT_SECRET: &str = "realtime_client_secret";
pub const REQ_TYPE_CLERK_USER_LIST: &str = "clerk_user_list";
pub const REQ_TYPE_CLERK_USER_GET: &str = "clerk_user_get";

/// One completion event per forwarded request. Never carries the key itself,
/// only where it came from.
#[allow(clippy::too_many_arguments)]
pub fn log_forward_request(
    start_time: DateTime<Utc>,
    method: &str,
    path: &str,
    request_type: &str,
    model: Option<&str>,
    credential: &str,
    status_code: u16,
    error_message: Option<String>,
) {
    let response_time_ms = (Utc::now() - start_time).num_milliseconds();
    match error_message {
        None => tracing::info!(
            method,
            path,
            request_type,
            model = model.unwrap_or("-"),
            credential,
            status_code,
            response_time_ms,
            "forwarded request"
        ),
        Some(error) => tracing::warn!(
            method,
            path,
            request_type,
            model = model.unwrap_or("-"),
            credential,
            status_code,
            response_time_ms,
            error = %error,
            "forwarded request failed"
        ),
    }
}

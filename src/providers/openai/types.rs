use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifetime of an issued realtime client secret, counted from creation.
pub const REALTIME_EXPIRY_SECONDS: u64 = 600;

/// Speech body: caller fields forwarded verbatim, except `model`, which the
/// service always pins. A caller-supplied `model` is accepted and dropped.
pub fn speech_payload(mut body: Map<String, Value>, model: &str) -> Map<String, Value> {
    body.insert("model".to_string(), Value::String(model.to_string()));
    body
}

/// Responses body: `input` plus any extra caller fields, with `model` pinned.
pub fn responses_payload(mut body: Map<String, Value>, model: &str) -> Map<String, Value> {
    body.insert("model".to_string(), Value::String(model.to_string()));
    body
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSecretRequest<'a> {
    pub expires_after: ExpiresAfter,
    pub session: RealtimeSession<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpiresAfter {
    pub anchor: &'static str,
    pub seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RealtimeSession<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub model: &'a str,
    pub instructions: &'a str,
}

impl<'a> ClientSecretRequest<'a> {
    pub fn new(model: &'a str, instructions: &'a str) -> Self {
        Self {
            expires_after: ExpiresAfter {
                anchor: "created_at",
                seconds: REALTIME_EXPIRY_SECONDS,
            },
            session: RealtimeSession {
                kind: "realtime",
                model,
                instructions,
            },
        }
    }
}

/// Required shape of the client-secret reply; other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecretReply {
    pub value: String,
    pub expires_at: f64,
}

/// 与官方 SDK 的 `output_text` 便捷属性一致：
/// 优先取顶层 output_text，否则拼接所有 message 中 output_text 片段
pub fn output_text(response: &Value) -> String {
    if let Some(text) = response.get("output_text").and_then(Value::as_str) {
        return text.to_string();
    }

    let mut out = String::new();
    let items = response
        .get("output")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for item in items {
        if item.get("type").and_then(Value::as_str) != Some("message") {
            continue;
        }
        let parts = item
            .get("content")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for part in parts {
            if part.get("type").and_then(Value::as_str) == Some("output_text")
                && let Some(text) = part.get("text").and_then(Value::as_str)
            {
                out.push_str(text);
            }
        }
    }
    out
}

use std::fmt;

use serde_json::{Map, Value};

/// Field a caller uses to supply their own upstream key.
pub const API_KEY_FIELD: &str = "apiKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Caller,
    Server,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Caller => "caller",
            CredentialSource::Server => "server",
        }
    }
}

/// The key actually used for one upstream call. Lives for a single request.
#[derive(Clone, PartialEq, Eq)]
pub struct EffectiveCredential<'a> {
    key: &'a str,
    source: CredentialSource,
}

impl<'a> EffectiveCredential<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

impl fmt::Debug for EffectiveCredential<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveCredential")
            .field("key", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Caller key if non-empty, otherwise the server default if non-empty.
/// `None` is not an error here: the upstream rejects the unauthenticated call.
pub fn resolve_credential<'a>(
    caller: Option<&'a str>,
    server: Option<&'a str>,
) -> Option<EffectiveCredential<'a>> {
    if let Some(key) = caller.filter(|k| !k.is_empty()) {
        return Some(EffectiveCredential {
            key,
            source: CredentialSource::Caller,
        });
    }
    server
        .filter(|k| !k.is_empty())
        .map(|key| EffectiveCredential {
            key,
            source: CredentialSource::Server,
        })
}

/// 从请求体中移除 apiKey（无论类型都不转发给上游），仅字符串值可作为凭据。
///
/// A non-string `apiKey` is dropped even when it would be truthy (`12345`,
/// `true`, an object), so the request falls back to the server key instead of
/// sending a stringified value as the bearer token. Empty strings fall back too,
/// see [`resolve_credential`].
pub fn take_api_key(body: &mut Map<String, Value>) -> Option<String> {
    match body.remove(API_KEY_FIELD) {
        Some(Value::String(key)) => Some(key),
        _ => None,
    }
}

pub fn credential_source_label(credential: Option<&EffectiveCredential<'_>>) -> &'static str {
    credential.map(|c| c.source().as_str()).unwrap_or("none")
}

use std::time::Duration;

use reqwest::Url;

use crate::error::GatewayError;

/// Shared upstream client. Without a configured timeout the reqwest default
/// applies, so a hung upstream keeps the request open.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// 拼接上游地址：base_url 允许带或不带结尾斜杠，segments 逐段编码
pub fn join_url(base_url: &str, segments: &[&str]) -> Result<Url, GatewayError> {
    let mut url = Url::parse(base_url.trim_end_matches('/'))
        .map_err(|e| GatewayError::Config(format!("invalid upstream base url {}: {}", base_url, e)))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| GatewayError::Config(format!("upstream base url cannot be a base: {}", base_url)))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

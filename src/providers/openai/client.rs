use reqwest::Client;
use serde_json::{Map, Value};

use crate::error::GatewayError;
use crate::http_client::join_url;
use crate::providers::{ensure_success, with_bearer};

use super::types::{ClientSecretReply, ClientSecretRequest};

pub struct OpenAIProvider;

impl OpenAIProvider {
    /// Returns the upstream reply untouched so the audio body can be streamed on.
    pub async fn create_speech(
        client: &Client,
        base_url: &str,
        api_key: Option<&str>,
        payload: &Map<String, Value>,
    ) -> Result<reqwest::Response, GatewayError> {
        let url = join_url(base_url, &["v1", "audio", "speech"])?;
        let response = with_bearer(client.post(url), api_key)
            .json(payload)
            .send()
            .await?;
        ensure_success(response).await
    }

    pub async fn create_response(
        client: &Client,
        base_url: &str,
        api_key: Option<&str>,
        payload: &Map<String, Value>,
    ) -> Result<Value, GatewayError> {
        let url = join_url(base_url, &["v1", "responses"])?;
        let response = with_bearer(client.post(url), api_key)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn create_client_secret(
        client: &Client,
        base_url: &str,
        api_key: Option<&str>,
        request: &ClientSecretRequest<'_>,
    ) -> Result<ClientSecretReply, GatewayError> {
        let url = join_url(base_url, &["v1", "realtime", "client_secrets"])?;
        let response = with_bearer(client.post(url), api_key)
            .json(request)
            .send()
            .await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        // 上游 200 但结构不符（缺字段/类型错误/非 JSON）都算校验失败
        serde_json::from_slice::<ClientSecretReply>(&bytes)
            .map_err(|e| GatewayError::Validation(e.to_string()))
    }
}

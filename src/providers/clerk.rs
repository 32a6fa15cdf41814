use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;
use crate::http_client::join_url;
use crate::providers::ensure_success;

/// Paging/filter options forwarded to the Clerk user list as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl UserListQuery {
    /// `/v1/users/count` takes the filters but not the paging options.
    fn count_filter(&self) -> UserCountQuery<'_> {
        UserCountQuery {
            query: self.query.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UserCountQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TotalCount {
    total_count: u64,
}

pub struct ClerkProvider;

impl ClerkProvider {
    /// Same envelope as the Clerk SDK's `getUserList`: one page of users plus
    /// the total matching the filter, fetched concurrently.
    pub async fn list_users(
        client: &Client,
        base_url: &str,
        secret_key: &str,
        query: &UserListQuery,
    ) -> Result<Value, GatewayError> {
        let users_url = join_url(base_url, &["v1", "users"])?;
        let count_url = join_url(base_url, &["v1", "users", "count"])?;

        let users = async {
            let response = client
                .get(users_url)
                .bearer_auth(secret_key)
                .query(query)
                .send()
                .await?;
            Ok::<_, GatewayError>(ensure_success(response).await?.json::<Value>().await?)
        };
        let count = async {
            let response = client
                .get(count_url)
                .bearer_auth(secret_key)
                .query(&query.count_filter())
                .send()
                .await?;
            Ok::<_, GatewayError>(ensure_success(response).await?.json::<TotalCount>().await?)
        };
        let (data, total) = tokio::try_join!(users, count)?;

        Ok(serde_json::json!({
            "data": data,
            "totalCount": total.total_count,
        }))
    }

    pub async fn get_user(
        client: &Client,
        base_url: &str,
        secret_key: &str,
        user_id: &str,
    ) -> Result<Value, GatewayError> {
        let url = join_url(base_url, &["v1", "users", user_id])?;
        let response = client.get(url).bearer_auth(secret_key).send().await?;
        Ok(ensure_success(response).await?.json::<Value>().await?)
    }
}

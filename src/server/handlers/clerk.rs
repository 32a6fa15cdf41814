use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;
use crate::providers::ClerkProvider;
use crate::providers::clerk::UserListQuery;
use crate::server::AppState;
use crate::server::request_logging::{
    REQ_TYPE_CLERK_USER_GET, REQ_TYPE_CLERK_USER_LIST, log_forward_request,
};

fn clerk_secret(app_state: &AppState) -> Result<&str, GatewayError> {
    app_state
        .config
        .secrets
        .clerk_secret_key
        .as_deref()
        .ok_or_else(|| GatewayError::Config("CLERK_SECRET_KEY is not configured".into()))
}

fn log_outcome(
    start_time: chrono::DateTime<Utc>,
    path: &str,
    request_type: &str,
    result: &Result<Value, GatewayError>,
) {
    let (status_code, error_message) = match result {
        Ok(_) => (200, None),
        Err(e) => (500, Some(e.to_string())),
    };
    log_forward_request(
        start_time,
        "GET",
        path,
        request_type,
        None,
        "server",
        status_code,
        error_message,
    );
}

pub async fn list_users(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Value>, GatewayError> {
    let start_time = Utc::now();
    let secret = clerk_secret(&app_state)?;

    let result = ClerkProvider::list_users(
        &app_state.http,
        &app_state.config.upstream.clerk_base_url,
        secret,
        &query,
    )
    .await;
    log_outcome(start_time, "/api/clerk/users", REQ_TYPE_CLERK_USER_LIST, &result);

    result.map(Json)
}

pub async fn get_user(
    Path(user_id): Path<String>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Value>, GatewayError> {
    let start_time = Utc::now();
    let secret = clerk_secret(&app_state)?;

    let result = ClerkProvider::get_user(
        &app_state.http,
        &app_state.config.upstream.clerk_base_url,
        secret,
        &user_id,
    )
    .await;
    log_outcome(start_time, "/api/clerk/user/{userId}", REQ_TYPE_CLERK_USER_GET, &result);

    result.map(Json)
}

#[cfg(test)]
mod tests {
    use crate::config::Secrets;
    use crate::server::test_support::{
        MockUpstream, RecordedCall, app, get, json_response, send, server_secrets, test_state,
    };
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    async fn directory() -> MockUpstream {
        MockUpstream::spawn(|call| match call.path.as_str() {
            "/v1/users/count" => json_response(
                StatusCode::OK,
                json!({"object": "total_count", "total_count": 42}),
            ),
            "/v1/users" => json_response(
                StatusCode::OK,
                json!([
                    {"id": "user_1", "first_name": "Ada", "email_addresses": []},
                    {"id": "user_2", "first_name": "Linus", "email_addresses": []}
                ]),
            ),
            "/v1/users/user_1" => json_response(
                StatusCode::OK,
                json!({"id": "user_1", "first_name": "Ada", "email_addresses": []}),
            ),
            _ => json_response(
                StatusCode::NOT_FOUND,
                json!({"errors": [{"message": "not found", "code": "resource_not_found"}]}),
            ),
        })
        .await
    }

    fn call_to<'a>(calls: &'a [RecordedCall], path: &str) -> &'a RecordedCall {
        calls
            .iter()
            .find(|c| c.path == path)
            .unwrap_or_else(|| panic!("no upstream call to {}", path))
    }

    #[tokio::test]
    async fn list_wraps_page_with_total_count() {
        let upstream = directory().await;
        let router = app(test_state(&upstream.base_url, &upstream.base_url, server_secrets()));

        let (status, _, bytes) = send(router, get("/api/clerk/users")).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["data"].as_array().unwrap().len(), 2);
        assert_eq!(v["data"][1]["id"], "user_2");
        assert_eq!(v["totalCount"], 42);
        assert_eq!(v.as_object().unwrap().len(), 2);

        let calls = upstream.calls();
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert_eq!(call.method, "GET");
            assert_eq!(call.authorization.as_deref(), Some("Bearer sk_test_clerk"));
            assert!(call.query.is_none());
        }
    }

    #[tokio::test]
    async fn list_forwards_paging_and_filter_params() {
        let upstream = directory().await;
        let router = app(test_state(&upstream.base_url, &upstream.base_url, server_secrets()));

        let (status, _, _) = send(
            router,
            get("/api/clerk/users?limit=10&offset=20&order_by=-created_at&query=ada"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let calls = upstream.calls();
        let list_query = call_to(&calls, "/v1/users").query.clone().unwrap();
        assert!(list_query.contains("limit=10"));
        assert!(list_query.contains("offset=20"));
        assert!(list_query.contains("order_by=-created_at"));
        assert!(list_query.contains("query=ada"));

        let count_query = call_to(&calls, "/v1/users/count").query.clone().unwrap();
        assert_eq!(count_query, "query=ada");
    }

    #[tokio::test]
    async fn failed_count_fails_the_list() {
        let upstream = MockUpstream::spawn(|call| match call.path.as_str() {
            "/v1/users" => json_response(StatusCode::OK, json!([])),
            _ => json_response(StatusCode::INTERNAL_SERVER_ERROR, json!({"errors": []})),
        })
        .await;
        let router = app(test_state(&upstream.base_url, &upstream.base_url, server_secrets()));

        let (status, _, _) = send(router, get("/api/clerk/users")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn get_user_looks_up_by_path_param() {
        let upstream = directory().await;
        let router = app(test_state(&upstream.base_url, &upstream.base_url, server_secrets()));

        let (status, _, bytes) = send(router, get("/api/clerk/user/user_1")).await;
        assert_eq!(status, StatusCode::OK);
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["first_name"], "Ada");
        assert_eq!(upstream.single_call().path, "/v1/users/user_1");
    }

    #[tokio::test]
    async fn unknown_user_is_500() {
        let upstream = directory().await;
        let router = app(test_state(&upstream.base_url, &upstream.base_url, server_secrets()));

        let (status, _, _) = send(router, get("/api/clerk/user/user_404")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn missing_secret_fails_without_upstream_call() {
        let upstream = directory().await;
        let secrets = Secrets {
            openai_api_key: Some("server-key".into()),
            ..Default::default()
        };
        let router = app(test_state(&upstream.base_url, &upstream.base_url, secrets));

        let (status, _, _) = send(router, get("/api/clerk/users")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(upstream.calls().is_empty());
    }
}

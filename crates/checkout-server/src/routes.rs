//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{create_payment, financial_institutions, health_check, verify_payment};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let static_dir = state.upstream.config().static_dir.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))

        // Payments
        .route("/api/payments/create", post(create_payment))
        .route("/api/payments/verify", post(verify_payment))
        .route("/api/payments/pse/financial-institutions", get(financial_institutions))

        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(static_dir))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json,
        body::Body,
        extract::{Path, State},
        http::{HeaderMap, Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ProxyConfig;
    use crate::upstream::UpstreamClient;

    type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

    fn auth(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// Fake gateway REST API recording path, auth header and body
    async fn fake_gateway() -> (String, Seen) {
        let seen = Seen::default();

        let app = Router::new()
            .route(
                "/v1/transactions",
                post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(("/transactions".into(), auth(&headers), body));
                    (StatusCode::CREATED, Json(json!({ "data": { "id": "tx-1", "status": "PENDING" } })))
                }),
            )
            .route(
                "/v1/transactions/{id}",
                get(|State(seen): State<Seen>, headers: HeaderMap, Path(id): Path<String>| async move {
                    seen.lock().unwrap().push((format!("/transactions/{id}"), auth(&headers), Value::Null));
                    (StatusCode::NOT_FOUND, Json(json!({ "error": { "type": "NOT_FOUND_ERROR" } })))
                }),
            )
            .route(
                "/v1/pse/financial_institutions",
                get(|State(seen): State<Seen>, headers: HeaderMap| async move {
                    seen.lock().unwrap().push(("/pse".into(), auth(&headers), Value::Null));
                    Json(json!({ "data": [
                        { "financial_institution_code": "1", "financial_institution_name": "Banco que aprueba" }
                    ] }))
                }),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1"), seen)
    }

    fn proxy(config: ProxyConfig) -> Router {
        router(AppState { upstream: Arc::new(UpstreamClient::new(config)) })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_is_forwarded_with_private_key() {
        let (upstream, seen) = fake_gateway().await;
        let config = ProxyConfig {
            private_key: Some("prv_test_123".into()),
            ..ProxyConfig::with_upstream(upstream)
        };

        let payload = json!({ "amount": 1000.0, "payment_method": { "type": "NEQUI", "phone_number": "3991111111" } });
        let (status, body) = send(proxy(config), post_json("/api/payments/create", &payload)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["id"], "tx-1");

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "/transactions");
        assert_eq!(seen[0].1.as_deref(), Some("Bearer prv_test_123"));
        assert_eq!(seen[0].2, payload);
    }

    #[tokio::test]
    async fn test_verify_relays_upstream_status() {
        let (upstream, seen) = fake_gateway().await;

        let (status, body) = send(
            proxy(ProxyConfig::with_upstream(upstream)),
            post_json("/api/payments/verify", &json!({ "transactionId": "tx-77" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "NOT_FOUND_ERROR");
        assert_eq!(seen.lock().unwrap()[0].0, "/transactions/tx-77");
    }

    #[tokio::test]
    async fn test_verify_requires_transaction_id() {
        let (status, _) = send(
            proxy(ProxyConfig::default()),
            post_json("/api/payments/verify", &json!({ "id": "tx-77" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_verify_rejects_blank_transaction_id() {
        let (upstream, seen) = fake_gateway().await;

        for id in ["", "   "] {
            let (status, body) = send(
                proxy(ProxyConfig::with_upstream(upstream.clone())),
                post_json("/api/payments/verify", &json!({ "transactionId": id })),
            )
            .await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["code"], "INVALID_TRANSACTION_ID");
        }
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_banks_use_public_key() {
        let (upstream, seen) = fake_gateway().await;
        let config = ProxyConfig {
            public_key: Some("pub_test_456".into()),
            ..ProxyConfig::with_upstream(upstream)
        };

        let request = Request::builder()
            .uri("/api/payments/pse/financial-institutions")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(proxy(config), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["financial_institution_code"], "1");
        assert_eq!(seen.lock().unwrap()[0].1.as_deref(), Some("Bearer pub_test_456"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ProxyConfig::with_upstream(format!("http://{addr}/v1"));
        let (status, body) = send(
            proxy(config),
            post_json("/api/payments/create", &json!({ "amount": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "UPSTREAM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(proxy(ProxyConfig::default()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["private_key_configured"], false);
    }
}

//! HTTP routes.
//!
//! Each route only extracts request parts and hands them to the
//! [`Handler`]; validation and error mapping happen there.

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mercadopago_gateway::{
    Handler, HandlerResponse, PaymentService,
    handler::Validator,
};
use serde::Deserialize;

/// Header carrying the caller's Mercado Pago access token.
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

type AppState<S, V> = State<Arc<Handler<S, V>>>;

#[derive(Debug, Deserialize)]
struct CredentialsQuery {
    client_id: Option<String>,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    external_reference: Option<String>,
}

/// Builds the application router.
pub fn router<S, V>(handler: Handler<S, V>) -> Router
where
    S: PaymentService + 'static,
    V: Validator + 'static,
{
    Router::new()
        .route("/ping", get(ping::<S, V>))
        .route("/access_token", post(access_token::<S, V>))
        .route("/preferences", post(create_preference::<S, V>))
        .route("/preferences/:id", get(checkout_preference::<S, V>))
        .route("/payments/total", get(total_payments::<S, V>))
        .route("/payments/search", get(payment_search::<S, V>))
        .route("/payments/:id", get(payment::<S, V>))
        .with_state(Arc::new(handler))
}

async fn ping<S: PaymentService, V: Validator>(State(handler): AppState<S, V>) -> Response {
    reply(handler.ping())
}

async fn access_token<S: PaymentService, V: Validator>(
    State(handler): AppState<S, V>,
    Query(query): Query<CredentialsQuery>,
) -> Response {
    reply(
        handler
            .get_access_token(query.client_id.as_deref(), query.client_secret.as_deref())
            .await,
    )
}

async fn create_preference<S: PaymentService, V: Validator>(
    State(handler): AppState<S, V>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    reply(handler.create_preference(access_token_header(&headers), &body).await)
}

async fn checkout_preference<S: PaymentService, V: Validator>(
    State(handler): AppState<S, V>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    reply(handler.get_checkout_preference(access_token_header(&headers), Some(&id)).await)
}

async fn total_payments<S: PaymentService, V: Validator>(
    State(handler): AppState<S, V>,
    Query(query): Query<StatusQuery>,
    headers: HeaderMap,
) -> Response {
    reply(
        handler
            .get_total_payments(access_token_header(&headers), query.status.as_deref())
            .await,
    )
}

async fn payment_search<S: PaymentService, V: Validator>(
    State(handler): AppState<S, V>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> Response {
    reply(
        handler
            .get_payment_search(access_token_header(&headers), query.external_reference.as_deref())
            .await,
    )
}

async fn payment<S: PaymentService, V: Validator>(
    State(handler): AppState<S, V>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    reply(handler.get_payment(access_token_header(&headers), Some(&id)).await)
}

fn access_token_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(ACCESS_TOKEN_HEADER).and_then(|value| value.to_str().ok())
}

fn reply(response: HandlerResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = [(header::CONTENT_TYPE, response.content_type.as_str())];
    (status, content_type, response.body).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{body::Body, http::Request};
    use mercadopago_gateway::{
        RemoteError, Result,
        handler::RuleValidator,
        models::{AccessToken, Payment, PaymentSearchResult, Preference, PreferenceResult},
    };
    use tower::ServiceExt;

    use super::*;

    /// Answers every call with fixed data and records what it was asked.
    #[derive(Debug, Default)]
    struct StubService {
        calls: Mutex<Vec<String>>,
    }

    impl StubService {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl PaymentService for StubService {
        async fn get_access_token<'a>(
            &'a self,
            client_id: &'a str,
            client_secret: &'a str,
        ) -> Result<AccessToken> {
            self.record(format!("token {client_id} {client_secret}"));
            Ok(AccessToken::new("APP_USR-1"))
        }

        async fn create_preference<'a>(
            &'a self,
            access_token: &'a str,
            _preference: &'a Preference,
        ) -> Result<PreferenceResult> {
            self.record(format!("preference {access_token}"));
            Ok(PreferenceResult { id: "I".to_owned(), checkout_url: "U".to_owned() })
        }

        async fn get_checkout_preference<'a>(
            &'a self,
            access_token: &'a str,
            id: &'a str,
        ) -> Result<i64> {
            self.record(format!("checkout {access_token} {id}"));
            Ok(1500)
        }

        async fn get_payment<'a>(&'a self, access_token: &'a str, id: &'a str) -> Result<Payment> {
            self.record(format!("payment {access_token} {id}"));
            Err(RemoteError::new(r#"{"message":"Payment not found"}"#, 404).into())
        }

        async fn get_payment_search<'a>(
            &'a self,
            access_token: &'a str,
            external_reference: &'a str,
        ) -> Result<PaymentSearchResult> {
            self.record(format!("search {access_token} {external_reference}"));
            Ok(PaymentSearchResult::default())
        }

        async fn get_total_payments<'a>(
            &'a self,
            access_token: &'a str,
            status: &'a str,
        ) -> Result<u64> {
            self.record(format!("total {access_token} {status}"));
            Ok(100)
        }
    }

    fn app() -> Router {
        router(Handler::new(StubService::default(), RuleValidator::default()))
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(token) = token {
            builder = builder.header(ACCESS_TOKEN_HEADER, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        assert_eq!(send(get("/ping", None)).await, (StatusCode::OK, "pong".to_owned()));
    }

    #[tokio::test]
    async fn test_access_token() {
        let request = Request::post("/access_token?client_id=ABC123&client_secret=123ABC")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(request).await, (StatusCode::OK, "APP_USR-1".to_owned()));

        let request = Request::post("/access_token?client_id=ABC123").body(Body::empty()).unwrap();
        assert_eq!(
            send(request).await,
            (StatusCode::BAD_REQUEST, "client secret is required".to_owned())
        );
    }

    #[tokio::test]
    async fn test_create_preference() {
        let body = r#"{"items":[{"title":"Mate","quantity":1,"unit_price":10}],
            "payer":{"email":"a@b.c"}}"#;
        let request = Request::post("/preferences")
            .header(ACCESS_TOKEN_HEADER, "TOKEN")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"id":"I","checkout_url":"U"}"#);
    }

    #[tokio::test]
    async fn test_create_preference_bad_body() {
        let request = Request::post("/preferences")
            .header(ACCESS_TOKEN_HEADER, "TOKEN")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.starts_with("couldn't decode body: "));
    }

    #[tokio::test]
    async fn test_static_payment_routes_win_over_id() {
        let (status, body) = send(get("/payments/total?status=approved", Some("TOKEN"))).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "total payments: 100"));

        let search = get("/payments/search?external_reference=order-1", Some("TOKEN"));
        let (status, body) = send(search).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"results":[]}"#);
    }

    #[tokio::test]
    async fn test_total_payments_requires_token_and_valid_status() {
        let (status, _) = send(get("/payments/total?status=approved", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(get("/payments/total?status=refunded", Some("TOKEN"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "invalid status: got: refunded, want: approved, rejected or pending");
    }

    #[tokio::test]
    async fn test_payment_remote_status_passes_through() {
        let (status, body) = send(get("/payments/20359978", Some("TOKEN"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"couldn't get payment: {"message":"Payment not found"}"#);
    }

    #[tokio::test]
    async fn test_checkout_preference() {
        let (status, body) = send(get("/preferences/123-abc", Some("TOKEN"))).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "total amount: 1500"));
    }
}

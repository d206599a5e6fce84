//! ApiClient against a local axum server speaking the catalog backend's
//! wire format.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use reelshelf_client::domains::auth::AuthService;
use reelshelf_client::domains::catalog::PageFetcher;
use reelshelf_client::error::NetworkError;
use reelshelf_client::infra::api_client::ApiClient;
use reelshelf_client::infra::api_types::AuthToken;
use reelshelf_client::infra::services::CatalogApi;
use reelshelf_model::{MediaKind, QuerySignature, RecordId};

#[derive(Debug, Clone)]
struct Seen {
    method: &'static str,
    path: String,
    query: HashMap<String, String>,
    authorization: Option<String>,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
    logins: Arc<Mutex<Vec<Value>>>,
}

impl Backend {
    fn record(
        &self,
        method: &'static str,
        path: String,
        headers: &HeaderMap,
        query: HashMap<String, String>,
    ) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.seen.lock().unwrap().push(Seen {
            method,
            path,
            query,
            authorization,
        });
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

fn arrival() -> Value {
    json!({
        "id": 1,
        "title": "Arrival",
        "director": "Denis Villeneuve",
        "releaseYear": 2016,
        "type": "MOVIE",
        "poster": { "id": 7, "url": "https://cdn.example/arrival.jpg" },
        "images": []
    })
}

async fn list_movies(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    backend.record("GET", "/movies".into(), &headers, query);
    Json(json!({ "data": [arrival()], "page": page, "totalPages": 3 }))
}

async fn get_movie(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.record("GET", format!("/movies/{id}"), &headers, HashMap::new());
    match id {
        1 => Json(arrival()).into_response(),
        99 => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": false, "message": "Token expired" })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status": false, "message": "Movie not found" })),
        )
            .into_response(),
    }
}

async fn delete_movie(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> StatusCode {
    backend.record("DELETE", format!("/movies/{id}"), &headers, HashMap::new());
    StatusCode::NO_CONTENT
}

async fn login(State(backend): State<Backend>, Json(body): Json<Value>) -> Response {
    backend.logins.lock().unwrap().push(body.clone());
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "status": false, "message": "Invalid credentials" })),
        )
            .into_response();
    }
    Json(json!({
        "status": true,
        "message": "Login successful",
        "data": {
            "user": { "id": "u-1", "email": body["email"], "name": "Ada" },
            "token": "tok-123"
        }
    }))
    .into_response()
}

async fn serve() -> (ApiClient, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/{id}", get(get_movie).delete(delete_movie))
        .route("/auth/login", post(login))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (ApiClient::new(format!("http://{addr}")), backend)
}

#[tokio::test]
async fn listing_sends_paging_and_active_filters() {
    let (client, backend) = serve().await;
    let signature = QuerySignature::new()
        .with_search("arrival")
        .with_type(Some(MediaKind::Movie));

    let page = client.fetch(&signature, 2).await.unwrap();
    assert_eq!(page.page_number, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].title, "Arrival");
    assert_eq!(
        page.records[0].poster_url(),
        Some("https://cdn.example/arrival.jpg")
    );

    let seen = backend.seen();
    assert_eq!(seen.len(), 1);
    let query = &seen[0].query;
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("limit").map(String::as_str), Some("20"));
    assert_eq!(query.get("search").map(String::as_str), Some("arrival"));
    assert_eq!(query.get("type").map(String::as_str), Some("MOVIE"));
    assert!(!query.contains_key("director"));
    assert!(!query.contains_key("releaseYear"));
    assert!(seen[0].authorization.is_none());
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let (client, _backend) = serve().await;

    let err = client.get_record(RecordId(42)).await.unwrap_err();
    match err {
        NetworkError::Status {
            status, message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Movie not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn login_token_authorizes_later_requests() {
    let (client, backend) = serve().await;
    let auth = AuthService::new(client.clone());

    let session = auth.login(" ada@example.com ", "secret").await.unwrap();
    assert_eq!(session.token.as_ref().map(AuthToken::as_str), Some("tok-123"));
    assert_eq!(session.user.as_ref().map(|u| u.name.as_str()), Some("Ada"));
    assert_eq!(
        backend.logins.lock().unwrap()[0]["email"],
        json!("ada@example.com")
    );

    client.get_record(RecordId(1)).await.unwrap();
    client.delete_record(RecordId(1)).await.unwrap();

    let seen = backend.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].method, "DELETE");
    assert_eq!(seen[1].path, "/movies/1");
    for request in &seen {
        assert_eq!(request.authorization.as_deref(), Some("Bearer tok-123"));
    }
}

#[tokio::test]
async fn rejected_login_keeps_client_anonymous() {
    let (client, _backend) = serve().await;
    let auth = AuthService::new(client.clone());

    let err = auth.login("ada@example.com", "wrong").await.unwrap_err();
    assert!(err.to_string().contains("Invalid credentials"));
    assert!(client.session().await.token.is_none());
}

#[tokio::test]
async fn unauthorized_response_clears_token() {
    let (client, _backend) = serve().await;
    client.set_token(Some(AuthToken::new("stale"))).await;

    let err = client.get_record(RecordId(99)).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(client.session().await.token.is_none());
}

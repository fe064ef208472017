#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use axum_macros::debug_handler;
use notes_client::{
    Note,
    config::{Config, Credentials},
};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use std::{net::SocketAddr, sync::Arc, time::Duration};

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret";
pub const AUTHORIZATION: &str = "Basic YWxpY2U6c2VjcmV0";

pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";
pub const UPDATED_AT: &str = "2024-01-02T00:00:00Z";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Default)]
pub struct BackendState {
    notes: Mutex<Vec<Note>>,
    requests: Mutex<Vec<RecordedRequest>>,
    fail_with: Mutex<Option<StatusCode>>,
}

impl BackendState {
    async fn record(
        &self,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: Option<serde_json::Value>,
    ) -> Result<(), Response> {
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let request = RecordedRequest {
            method,
            uri: uri.to_string(),
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
            body,
        };
        let authorized = request.authorization.as_deref() == Some(AUTHORIZATION);
        self.requests.lock().await.push(request);

        if !authorized {
            return Err((StatusCode::UNAUTHORIZED, "Missing or invalid credentials").into_response());
        }
        if let Some(status) = *self.fail_with.lock().await {
            return Err((status, "Injected failure").into_response());
        }

        Ok(())
    }
}

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn spawn(notes: Vec<Note>) -> Self {
        let state = Arc::new(BackendState {
            notes: Mutex::new(notes),
            ..BackendState::default()
        });

        let router = Router::new()
            .route("/api/notes", get(get_all_notes).post(create_note))
            .route("/api/notes/search", get(search_notes))
            .route("/api/notes/{id}", put(update_note).delete(delete_note))
            .with_state(state.clone())
            .layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("failed to start fake notes service");
        });

        Self { addr, state }
    }

    pub fn config(&self) -> Config {
        Config {
            base_url: format!("http://{}", self.addr),
            credentials: Credentials {
                username: USERNAME.to_string(),
                password: PASSWORD.to_string(),
            },
            timeout: Some(Duration::from_secs(5)),
        }
    }

    pub async fn fail_with(&self, status: Option<StatusCode>) {
        *self.state.fail_with.lock().await = status;
    }

    pub async fn notes(&self) -> Vec<Note> {
        self.state.notes.lock().await.clone()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub async fn last_request(&self) -> RecordedRequest {
        self.requests()
            .await
            .pop()
            .expect("no request reached the fake notes service")
    }
}

pub fn note(id: i64, title: &str, content: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
        created_at: CREATED_AT.to_string(),
        updated_at: CREATED_AT.to_string(),
    }
}

pub fn sample_notes() -> Vec<Note> {
    vec![note(1, "Note 1", "Content 1"), note(2, "Note 2", "Content 2")]
}

#[derive(Deserialize)]
struct SearchParams {
    title: String,
}

#[derive(Deserialize)]
struct CreateNoteRequest {
    title: String,
    content: String,
}

#[debug_handler]
async fn get_all_notes(
    State(state): State<Arc<BackendState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = state.record(Method::GET, &uri, &headers, None).await {
        return response;
    }

    let notes = state.notes.lock().await.clone();
    (StatusCode::OK, Json(notes)).into_response()
}

#[debug_handler]
async fn search_notes(
    State(state): State<Arc<BackendState>>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    if let Err(response) = state.record(Method::GET, &uri, &headers, None).await {
        return response;
    }

    let needle = params.title.to_lowercase();
    let notes: Vec<Note> = state
        .notes
        .lock()
        .await
        .iter()
        .filter(|n| n.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    (StatusCode::OK, Json(notes)).into_response()
}

#[debug_handler]
async fn create_note(
    State(state): State<Arc<BackendState>>,
    uri: Uri,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    if let Err(response) = state
        .record(Method::POST, &uri, &headers, Some(payload.clone()))
        .await
    {
        return response;
    }

    let Ok(request) = serde_json::from_value::<CreateNoteRequest>(payload) else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "Invalid note").into_response();
    };

    let mut notes = state.notes.lock().await;
    let id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
    let created = note(id, &request.title, &request.content);
    notes.push(created.clone());

    (StatusCode::CREATED, Json(created)).into_response()
}

#[debug_handler]
async fn update_note(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    if let Err(response) = state
        .record(Method::PUT, &uri, &headers, Some(payload.clone()))
        .await
    {
        return response;
    }

    let Ok(request) = serde_json::from_value::<Note>(payload) else {
        return (StatusCode::UNPROCESSABLE_ENTITY, "Invalid note").into_response();
    };

    let mut notes = state.notes.lock().await;
    match notes.iter_mut().find(|n| n.id == id) {
        Some(entry) => {
            entry.title = request.title;
            entry.content = request.content;
            entry.updated_at = UPDATED_AT.to_string();
            (StatusCode::OK, Json(entry.clone())).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Note not found").into_response(),
    }
}

#[debug_handler]
async fn delete_note(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = state.record(Method::DELETE, &uri, &headers, None).await {
        return response;
    }

    let mut notes = state.notes.lock().await;
    let before = notes.len();
    notes.retain(|n| n.id != id);

    if notes.len() == before {
        (StatusCode::NOT_FOUND, "Note not found").into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

//! Typed HTTP client for the notes REST API.

use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};

use std::future::Future;

use crate::{
    config::{Config, Credentials},
    dto::{NewNote, Note},
};

pub const NOTES_PATH: &str = "/api/notes";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status. `reason` is the status text.
    #[error("{reason}")]
    Request { status: StatusCode, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Operations offered by the notes service.
pub trait NoteApi {
    fn list_all(&self) -> impl Future<Output = Result<Vec<Note>, ClientError>> + Send;

    fn create(&self, new_note: &NewNote)
    -> impl Future<Output = Result<Note, ClientError>> + Send;

    fn update(
        &self,
        id: i64,
        note: &Note,
    ) -> impl Future<Output = Result<Note, ClientError>> + Send;

    fn remove(&self, id: i64) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Notes whose title matches `title_query`. No match yields an empty list.
    fn search(
        &self,
        title_query: &str,
    ) -> impl Future<Output = Result<Vec<Note>, ClientError>> + Send;
}

#[derive(Debug, Clone)]
pub struct NoteClient {
    client: reqwest::Client,
    notes_url: String,
    credentials: Credentials,
}

impl NoteClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            notes_url: format!("{}{NOTES_PATH}", config.base_url.trim_end_matches('/')),
            credentials: config.credentials.clone(),
        })
    }

    pub fn notes_url(&self) -> &str {
        &self.notes_url
    }

    fn note_url(&self, id: i64) -> String {
        format!("{}/{id}", self.notes_url)
    }

    fn search_url(&self, title_query: &str) -> String {
        format!(
            "{}/search?title={}",
            self.notes_url,
            urlencoding::encode(title_query)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }

    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Notes service responded with {}", status);
            return Err(ClientError::Request {
                status,
                reason: status_text(status),
            });
        }

        Ok(response)
    }
}

impl NoteApi for NoteClient {
    async fn list_all(&self) -> Result<Vec<Note>, ClientError> {
        let response = Self::send(self.request(Method::GET, &self.notes_url)).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, new_note: &NewNote) -> Result<Note, ClientError> {
        let request = self.request(Method::POST, &self.notes_url).json(new_note);
        let response = Self::send(request).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: i64, note: &Note) -> Result<Note, ClientError> {
        let request = self.request(Method::PUT, &self.note_url(id)).json(note);
        let response = Self::send(request).await?;
        Ok(response.json().await?)
    }

    async fn remove(&self, id: i64) -> Result<(), ClientError> {
        Self::send(self.request(Method::DELETE, &self.note_url(id))).await?;
        Ok(())
    }

    async fn search(&self, title_query: &str) -> Result<Vec<Note>, ClientError> {
        let url = self.search_url(title_query);
        let response = Self::send(self.request(Method::GET, &url)).await?;
        Ok(response.json().await?)
    }
}

/// Canonical reason phrase of `status`, or the bare code for unregistered statuses.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.as_str().to_string(), str::to_string)
}

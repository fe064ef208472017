//! Session-scoped owner of the note collection.
//!
//! [`NoteStore`] is the single writer of the collection and its `loading`/`error` flags.
//! Readers take cloned [`NotesSnapshot`]s or [`subscribe`](NoteStore::subscribe) to changes.
//! State only changes after a remote call settles, and no lock is held across the call, so
//! overlapping operations each apply their effect to the collection as it is when their
//! response arrives.

use tokio::sync::watch;

use crate::{
    client::{ClientError, NoteApi},
    dto::{NewNote, Note},
};

/// Failure surfaced to readers. The message is fixed per operation, whatever the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("An error occurred while fetching notes.")]
    Fetch,

    #[error("An error occurred while adding the note.")]
    Add,

    #[error("An error occurred while updating the note.")]
    Update,

    #[error("An error occurred while deleting the note.")]
    Delete,

    #[error("An error occurred while searching notes.")]
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesSnapshot {
    pub notes: Vec<Note>,
    pub loading: bool,
    pub error: Option<StoreError>,
    settled: bool,
}

impl NotesSnapshot {
    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if self.error.is_some() {
            Status::Error
        } else if self.settled {
            Status::Ready
        } else {
            Status::Idle
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

pub struct NoteStore<A> {
    api: A,
    state: watch::Sender<NotesSnapshot>,
}

impl<A: NoteApi> NoteStore<A> {
    /// Creates a store that has not loaded anything yet. `loading` is `true` until the first
    /// load settles.
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(NotesSnapshot {
            notes: Vec::new(),
            loading: true,
            error: None,
            settled: false,
        });

        Self { api, state }
    }

    /// Creates a store and performs the initial load.
    pub async fn mount(api: A) -> Self {
        let store = Self::new(api);
        store.load_all().await;
        store
    }

    pub fn snapshot(&self) -> NotesSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotesSnapshot> {
        self.state.subscribe()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state.borrow().notes.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<StoreError> {
        self.state.borrow().error
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status()
    }

    pub async fn load_all(&self) {
        self.start_loading();
        let result = self.api.list_all().await;
        self.replace_notes(result, StoreError::Fetch);
    }

    pub async fn add(&self, new_note: &NewNote) {
        self.clear_error();

        match self.api.create(new_note).await {
            Ok(note) => {
                tracing::info!("Added note {}", note.id);
                self.state.send_modify(|state| {
                    state.notes.push(note);
                    state.settled = true;
                });
            }
            Err(e) => self.fail(StoreError::Add, &e),
        }
    }

    pub async fn edit(&self, id: i64, note: &Note) {
        self.clear_error();

        match self.api.update(id, note).await {
            Ok(saved) => {
                tracing::info!("Updated note {}", id);
                self.state.send_modify(|state| {
                    if let Some(entry) = state.notes.iter_mut().find(|n| n.id == id) {
                        *entry = saved;
                    }
                    state.settled = true;
                });
            }
            Err(e) => self.fail(StoreError::Update, &e),
        }
    }

    pub async fn remove(&self, id: i64) {
        self.clear_error();

        match self.api.remove(id).await {
            Ok(()) => {
                tracing::info!("Deleted note {}", id);
                self.state.send_modify(|state| {
                    state.notes.retain(|n| n.id != id);
                    state.settled = true;
                });
            }
            Err(e) => self.fail(StoreError::Delete, &e),
        }
    }

    /// Replaces the collection with the notes whose title matches `query`. A blank query
    /// reloads every note.
    pub async fn search(&self, query: &str) {
        self.start_loading();

        let result = if query.trim().is_empty() {
            self.api.list_all().await
        } else {
            self.api.search(query).await
        };

        self.replace_notes(result, StoreError::Search);
    }

    fn start_loading(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    fn replace_notes(&self, result: Result<Vec<Note>, ClientError>, failure: StoreError) {
        match result {
            Ok(notes) => {
                tracing::debug!("Loaded {} notes", notes.len());
                self.state.send_modify(|state| {
                    state.notes = notes;
                    state.loading = false;
                    state.settled = true;
                });
            }
            Err(e) => {
                tracing::error!("{} cause: {}", failure, e);
                self.state.send_modify(|state| {
                    state.error = Some(failure);
                    state.loading = false;
                    state.settled = true;
                });
            }
        }
    }

    fn fail(&self, failure: StoreError, cause: &ClientError) {
        tracing::error!("{} cause: {}", failure, cause);
        self.state.send_modify(|state| {
            state.error = Some(failure);
            state.settled = true;
        });
    }
}

//! Client for a remote notes REST service.
//!
//! [`client::NoteClient`] performs the raw requests, [`store::NoteStore`] owns the session's note
//! collection and exposes it to a presentation layer.

pub mod client;
pub mod config;
pub mod dto;
pub mod store;

pub use client::{ClientError, NoteApi, NoteClient};
pub use config::Config;
pub use dto::{NewNote, Note};
pub use store::{NoteStore, NotesSnapshot, Status, StoreError};

use clap::{Parser, Subcommand};
use notes_client::{NewNote, Note, NoteApi, NoteStore, NotesSnapshot, StoreError};
use tabled::{Table, Tabled, settings::Style};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List all notes
    List,
    /// Create a note
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Change the title and/or content of a note
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete { id: i64 },
    /// Search notes by title, a blank query lists every note
    Search { query: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Note not found with ID: {0}")]
    NoteNotFound(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Tabled)]
struct NoteRow {
    id: i64,
    title: String,
    content: String,
    #[tabled(rename = "updated")]
    updated_at: String,
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            updated_at: note.updated_at.clone(),
        }
    }
}

/// Applies `command` to an already mounted store.
pub async fn run<A: NoteApi>(store: &NoteStore<A>, command: Command) -> Result<(), CliError> {
    match command {
        Command::List => {}
        Command::Add { title, content } => store.add(&NewNote::new(title, content)).await,
        Command::Edit { id, title, content } => {
            let mut note = store
                .notes()
                .into_iter()
                .find(|n| n.id == id)
                .ok_or(CliError::NoteNotFound(id))?;
            if let Some(title) = title {
                note.title = title;
            }
            if let Some(content) = content {
                note.content = content;
            }
            store.edit(id, &note).await;
        }
        Command::Delete { id } => store.remove(id).await,
        Command::Search { query } => store.search(&query).await,
    }

    match store.error() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

pub fn render(snapshot: &NotesSnapshot) -> String {
    if snapshot.notes.is_empty() {
        return "No notes.".to_string();
    }

    let mut table = Table::new(snapshot.notes.iter().map(NoteRow::from));
    table.with(Style::psql());
    table.to_string()
}

pub mod create_note;
pub mod delete_note;
pub mod get_note;
pub mod list_notes;
pub mod update_note;

use crate::application::services::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("note not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: String,
    pub content: Option<String>,
}

impl NoteInput {
    pub(crate) fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

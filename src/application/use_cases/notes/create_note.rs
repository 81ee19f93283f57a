use crate::application::ports::note_repository::NoteRepository;
use crate::application::services::validation;
use crate::application::use_cases::notes::{NoteError, NoteInput};
use crate::domain::notes::note::Note;

pub struct CreateNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> CreateNote<'a, R> {
    pub async fn execute(&self, user_id: i64, input: &NoteInput) -> Result<Note, NoteError> {
        validation::require_note_title(&input.title)?;
        let note = self
            .repo
            .create_for_user(user_id, &input.title, input.content())
            .await?;
        Ok(note)
    }
}

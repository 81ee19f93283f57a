use crate::application::ports::note_repository::NoteRepository;
use crate::application::services::validation;
use crate::application::use_cases::notes::{NoteError, NoteInput};
use crate::domain::notes::note::Note;

pub struct UpdateNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> UpdateNote<'a, R> {
    // Overwrites title and content; a missing content clears it.
    pub async fn execute(
        &self,
        id: i64,
        user_id: i64,
        input: &NoteInput,
    ) -> Result<Note, NoteError> {
        validation::require_note_title(&input.title)?;
        self.repo
            .update_owned(id, user_id, &input.title, input.content())
            .await?
            .ok_or(NoteError::NotFound)
    }
}

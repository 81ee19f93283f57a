use crate::application::ports::note_repository::NoteRepository;
use crate::application::use_cases::notes::NoteError;

pub struct DeleteNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> DeleteNote<'a, R> {
    pub async fn execute(&self, id: i64, user_id: i64) -> Result<(), NoteError> {
        if self.repo.delete_owned(id, user_id).await? {
            tracing::debug!(note_id = id, user_id, "note_deleted");
            Ok(())
        } else {
            Err(NoteError::NotFound)
        }
    }
}

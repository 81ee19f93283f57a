use crate::application::ports::note_repository::NoteRepository;
use crate::application::use_cases::notes::NoteError;
use crate::domain::notes::note::Note;

pub struct GetNote<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> GetNote<'a, R> {
    pub async fn execute(&self, id: i64, user_id: i64) -> Result<Note, NoteError> {
        self.repo
            .get_owned(id, user_id)
            .await?
            .ok_or(NoteError::NotFound)
    }
}

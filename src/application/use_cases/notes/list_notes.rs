use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;

pub struct ListNotes<'a, R: NoteRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NoteRepository + ?Sized> ListNotes<'a, R> {
    pub async fn execute(&self, user_id: i64) -> anyhow::Result<Vec<Note>> {
        self.repo.list_for_user(user_id).await
    }
}

use async_trait::async_trait;

use crate::domain::notes::note::Note;

/// Every lookup and mutation is scoped by owner: a note that exists but belongs
/// to someone else behaves exactly like a missing one.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create_for_user(&self, user_id: i64, title: &str, content: &str)
    -> anyhow::Result<Note>;

    async fn list_for_user(&self, user_id: i64) -> anyhow::Result<Vec<Note>>;

    async fn get_owned(&self, id: i64, user_id: i64) -> anyhow::Result<Option<Note>>;

    async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Note>>;

    // Returns false if nothing matched id + owner
    async fn delete_owned(&self, id: i64, user_id: i64) -> anyhow::Result<bool>;
}

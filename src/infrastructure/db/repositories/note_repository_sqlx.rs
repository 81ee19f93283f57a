use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::note_repository::NoteRepository;
use crate::domain::notes::note::Note;
use crate::infrastructure::db::PgPool;

pub struct SqlxNoteRepository {
    pub pool: PgPool,
}

impl SqlxNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn note_from_row(r: &PgRow) -> Note {
    Note {
        id: r.get("id"),
        title: r.get("title"),
        content: r.get("content"),
        user_id: r.get("user_id"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl NoteRepository for SqlxNoteRepository {
    async fn create_for_user(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Note> {
        let row = sqlx::query(
            r#"INSERT INTO notes (title, content, user_id)
               VALUES ($1, $2, $3)
               RETURNING id, title, content, user_id, created_at, updated_at"#,
        )
        .bind(title)
        .bind(content)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(note_from_row(&row))
    }

    async fn list_for_user(&self, user_id: i64) -> anyhow::Result<Vec<Note>> {
        let rows = sqlx::query(
            r#"SELECT id, title, content, user_id, created_at, updated_at
               FROM notes WHERE user_id = $1
               ORDER BY id"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn get_owned(&self, id: i64, user_id: i64) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query(
            r#"SELECT id, title, content, user_id, created_at, updated_at
               FROM notes WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Note>> {
        let row = sqlx::query(
            r#"UPDATE notes SET
                    title = $1,
                    content = $2,
                    updated_at = now()
                WHERE id = $3 AND user_id = $4
                RETURNING id, title, content, user_id, created_at, updated_at"#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(note_from_row))
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

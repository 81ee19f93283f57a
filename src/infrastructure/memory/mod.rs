//! Process-local store used with `STORE_BACKEND=memory` and in tests.
//!
//! Enforces the same uniqueness rules as the SQL schema; the check and the
//! insert happen under one write lock.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::note_repository::NoteRepository;
use crate::application::ports::user_repository::{CreateUserError, UserRepository};
use crate::domain::accounts::account::{Account, AccountCredentials};
use crate::domain::notes::note::Note;

#[derive(Default)]
struct Users {
    next_id: i64,
    rows: BTreeMap<i64, AccountCredentials>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Users>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, CreateUserError> {
        let mut users = self.inner.write().await;
        if users.rows.values().any(|c| c.account.email == email) {
            return Err(CreateUserError::EmailTaken);
        }
        if users.rows.values().any(|c| c.account.username == username) {
            return Err(CreateUserError::UsernameTaken);
        }
        users.next_id += 1;
        let now = chrono::Utc::now();
        let account = Account {
            id: users.next_id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.rows.insert(
            account.id,
            AccountCredentials {
                account: account.clone(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<AccountCredentials>> {
        let users = self.inner.read().await;
        Ok(users
            .rows
            .values()
            .find(|c| c.account.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Account>> {
        let users = self.inner.read().await;
        Ok(users.rows.get(&id).map(|c| c.account.clone()))
    }

    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let users = self.inner.read().await;
        Ok(users.rows.values().any(|c| c.account.email == email))
    }

    async fn username_exists(&self, username: &str) -> anyhow::Result<bool> {
        let users = self.inner.read().await;
        Ok(users.rows.values().any(|c| c.account.username == username))
    }
}

#[derive(Default)]
struct Notes {
    next_id: i64,
    rows: BTreeMap<i64, Note>,
}

#[derive(Clone, Default)]
pub struct InMemoryNoteRepository {
    inner: Arc<RwLock<Notes>>,
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create_for_user(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Note> {
        let mut notes = self.inner.write().await;
        notes.next_id += 1;
        let now = chrono::Utc::now();
        let note = Note {
            id: notes.next_id,
            title: title.to_string(),
            content: content.to_string(),
            user_id,
            created_at: now,
            updated_at: now,
        };
        notes.rows.insert(note.id, note.clone());
        Ok(note)
    }

    async fn list_for_user(&self, user_id: i64) -> anyhow::Result<Vec<Note>> {
        let notes = self.inner.read().await;
        Ok(notes
            .rows
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_owned(&self, id: i64, user_id: i64) -> anyhow::Result<Option<Note>> {
        let notes = self.inner.read().await;
        Ok(notes.rows.get(&id).filter(|n| n.user_id == user_id).cloned())
    }

    async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Note>> {
        let mut notes = self.inner.write().await;
        let Some(note) = notes.rows.get_mut(&id).filter(|n| n.user_id == user_id) else {
            return Ok(None);
        };
        note.title = title.to_string();
        note.content = content.to_string();
        note.updated_at = chrono::Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete_owned(&self, id: i64, user_id: i64) -> anyhow::Result<bool> {
        let mut notes = self.inner.write().await;
        let owned = notes.rows.get(&id).is_some_and(|n| n.user_id == user_id);
        if owned {
            notes.rows.remove(&id);
        }
        Ok(owned)
    }
}

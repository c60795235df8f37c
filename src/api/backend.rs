//! The seam between the note service and the remote NoteVault API.

use async_trait::async_trait;
use color_eyre::Result;
use std::fmt;

use super::types::{Ack, ApiResponse, Note, User};

/// One of the six logical endpoints of the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
  Login,
  Register,
  Create,
  List,
  Update,
  Delete,
}

impl Operation {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Login => "login",
      Self::Register => "register",
      Self::Create => "create",
      Self::List => "list",
      Self::Update => "update",
      Self::Delete => "delete",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Remote note service.
///
/// Errors are opaque: the note service only distinguishes success from
/// failure and never inspects them beyond logging.
#[async_trait]
pub trait NoteBackend: Send + Sync {
  async fn login(&self, user: &User) -> Result<ApiResponse<User>>;

  async fn register(&self, user: &User) -> Result<ApiResponse<User>>;

  async fn create_note(&self, note: &Note) -> Result<ApiResponse<Note>>;

  /// Notes of one owner, in the order the service returns them
  async fn list_notes(&self, owner_id: u64) -> Result<ApiResponse<Vec<Note>>>;

  async fn update_note(&self, note_id: u64, note: &Note) -> Result<ApiResponse<Note>>;

  async fn delete_note(&self, note_id: u64) -> Result<ApiResponse<Ack>>;
}

#[async_trait]
impl<T: NoteBackend + ?Sized> NoteBackend for std::sync::Arc<T> {
  async fn login(&self, user: &User) -> Result<ApiResponse<User>> {
    (**self).login(user).await
  }

  async fn register(&self, user: &User) -> Result<ApiResponse<User>> {
    (**self).register(user).await
  }

  async fn create_note(&self, note: &Note) -> Result<ApiResponse<Note>> {
    (**self).create_note(note).await
  }

  async fn list_notes(&self, owner_id: u64) -> Result<ApiResponse<Vec<Note>>> {
    (**self).list_notes(owner_id).await
  }

  async fn update_note(&self, note_id: u64, note: &Note) -> Result<ApiResponse<Note>> {
    (**self).update_note(note_id, note).await
  }

  async fn delete_note(&self, note_id: u64) -> Result<ApiResponse<Ack>> {
    (**self).delete_note(note_id).await
  }
}

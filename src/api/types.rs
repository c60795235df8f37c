//! Domain types exchanged with the NoteVault API.
//!
//! The same types are used on the wire and in the application; field names
//! follow the remote service's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Identity record used for login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  /// Assigned by the remote service; absent before registration
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<u64>,
  pub username: String,
  pub password: String,
}

impl User {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      id: None,
      username: username.into(),
      password: password.into(),
    }
  }
}

/// A single note owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  /// Assigned by the remote service on create
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<u64>,
  pub title: String,
  pub content: String,
  /// Owning user; partitions the note list cache
  pub user_id: u64,
}

impl Note {
  /// Build a note that has not been created remotely yet.
  pub fn new(title: impl Into<String>, content: impl Into<String>, user_id: u64) -> Self {
    Self {
      id: None,
      title: title.into(),
      content: content.into(),
      user_id,
    }
  }

  pub fn with_id(mut self, id: u64) -> Self {
    self.id = Some(id);
    self
  }
}

/// Envelope returned by every successful API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
  pub data: T,
  #[serde(default)]
  pub message: String,
}

impl<T> ApiResponse<T> {
  pub fn new(data: T, message: impl Into<String>) -> Self {
    Self {
      data,
      message: message.into(),
    }
  }
}

/// Empty acknowledgement. Delete answers with `"data": {}`, `"data": null`
/// or no `data` field at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ack {}

impl<'de> Deserialize<'de> for Ack {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    // Going through Option lets a missing `data` field decode as None
    Option::<serde::de::IgnoredAny>::deserialize(deserializer)?;
    Ok(Ack {})
  }
}

//! In-memory backend that records calls, for tests.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::backend::{NoteBackend, Operation};
use super::types::{Ack, ApiResponse, Note, User};

#[derive(Default)]
pub struct FakeBackend {
  notes: Mutex<Vec<Note>>,
  calls: Mutex<HashMap<Operation, usize>>,
  failing: Mutex<HashSet<Operation>>,
  next_id: AtomicU64,
}

impl FakeBackend {
  pub fn new() -> Self {
    Self {
      next_id: AtomicU64::new(1),
      ..Self::default()
    }
  }

  /// Seed the remote store with notes that already have ids.
  pub fn with_notes(notes: Vec<Note>) -> Self {
    let next = notes.iter().filter_map(|n| n.id).max().unwrap_or(0) + 1;
    let backend = Self::new();
    backend.next_id.store(next, Ordering::SeqCst);
    *backend.notes.lock().unwrap() = notes;
    backend
  }

  pub fn calls(&self, op: Operation) -> usize {
    self.calls.lock().unwrap().get(&op).copied().unwrap_or(0)
  }

  pub fn total_calls(&self) -> usize {
    self.calls.lock().unwrap().values().sum()
  }

  pub fn fail(&self, op: Operation) {
    self.failing.lock().unwrap().insert(op);
  }

  pub fn recover(&self, op: Operation) {
    self.failing.lock().unwrap().remove(&op);
  }

  fn record(&self, op: Operation) -> Result<()> {
    *self.calls.lock().unwrap().entry(op).or_default() += 1;
    if self.failing.lock().unwrap().contains(&op) {
      return Err(eyre!("connection refused ({})", op));
    }
    Ok(())
  }
}

#[async_trait]
impl NoteBackend for FakeBackend {
  async fn login(&self, user: &User) -> Result<ApiResponse<User>> {
    self.record(Operation::Login)?;
    let mut user = user.clone();
    user.id.get_or_insert(1);
    Ok(ApiResponse::new(user, "logged in"))
  }

  async fn register(&self, user: &User) -> Result<ApiResponse<User>> {
    self.record(Operation::Register)?;
    let mut user = user.clone();
    user.id = Some(self.next_id.fetch_add(1, Ordering::SeqCst));
    Ok(ApiResponse::new(user, "registered"))
  }

  async fn create_note(&self, note: &Note) -> Result<ApiResponse<Note>> {
    self.record(Operation::Create)?;
    let created = note
      .clone()
      .with_id(self.next_id.fetch_add(1, Ordering::SeqCst));
    self.notes.lock().unwrap().push(created.clone());
    Ok(ApiResponse::new(created, "created"))
  }

  async fn list_notes(&self, owner_id: u64) -> Result<ApiResponse<Vec<Note>>> {
    self.record(Operation::List)?;
    let notes = self
      .notes
      .lock()
      .unwrap()
      .iter()
      .filter(|n| n.user_id == owner_id)
      .cloned()
      .collect();
    Ok(ApiResponse::new(notes, "ok"))
  }

  async fn update_note(&self, note_id: u64, note: &Note) -> Result<ApiResponse<Note>> {
    self.record(Operation::Update)?;
    let mut notes = self.notes.lock().unwrap();
    let existing = notes
      .iter_mut()
      .find(|n| n.id == Some(note_id))
      .ok_or_else(|| eyre!("note {} not found", note_id))?;
    *existing = note.clone().with_id(note_id);
    Ok(ApiResponse::new(existing.clone(), "updated"))
  }

  async fn delete_note(&self, note_id: u64) -> Result<ApiResponse<Ack>> {
    self.record(Operation::Delete)?;
    self.notes.lock().unwrap().retain(|n| n.id != Some(note_id));
    Ok(ApiResponse::new(Ack {}, "deleted"))
  }
}

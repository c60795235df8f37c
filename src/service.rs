//! Note service: remote calls with an owner-scoped list cache in front.

use color_eyre::Report;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{Ack, ApiResponse, HttpBackend, Note, NoteBackend, Operation, User};
use crate::cache::{CacheLayer, CacheResult};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Cached result of listing one owner's notes.
pub type NoteList = ApiResponse<Vec<Note>>;

/// Single entry point for note and user operations.
///
/// `list_notes` results are memoized per owner. A successful create, update
/// or delete drops the entry of the owner it affects; failed calls never
/// touch the cache.
///
/// Clones are cheap and share both the backend and the cache table.
///
/// # Concurrency
///
/// Calls for different owners, or different operations, may run at the same
/// time. One race is accepted: if a list for owner O misses and is still
/// awaiting the remote service when a write for O completes, the list
/// response is stored afterwards and can predate that write. The next write
/// for O, or [`NoteService::refresh_notes`], clears it up.
#[derive(Clone)]
pub struct NoteService {
  backend: Arc<dyn NoteBackend>,
  notes: CacheLayer<u64, NoteList>,
}

impl NoteService {
  /// Create a service with an in-memory cache.
  pub fn new(backend: impl NoteBackend + 'static) -> Self {
    Self::with_cache(backend, CacheLayer::memory())
  }

  pub fn with_cache(
    backend: impl NoteBackend + 'static,
    notes: CacheLayer<u64, NoteList>,
  ) -> Self {
    Self {
      backend: Arc::new(backend),
      notes,
    }
  }

  /// Build the HTTP-backed service described by `config`. Performs no I/O.
  pub fn from_config(config: &Config) -> color_eyre::Result<Self> {
    let backend = HttpBackend::new(&config.api)?;
    let notes = if config.cache.enabled {
      CacheLayer::memory()
    } else {
      CacheLayer::disabled()
    };
    Ok(Self::with_cache(backend, notes))
  }

  pub async fn login(&self, user: &User) -> ApiResult<ApiResponse<User>> {
    validate_credentials(user)?;
    let response = self
      .backend
      .login(user)
      .await
      .map_err(failed(Operation::Login))?;
    info!("User login: {}", user.username);
    Ok(response)
  }

  pub async fn register(&self, user: &User) -> ApiResult<ApiResponse<User>> {
    validate_credentials(user)?;
    let response = self
      .backend
      .register(user)
      .await
      .map_err(failed(Operation::Register))?;
    info!("User registration: {}", user.username);
    Ok(response)
  }

  /// Create a note and drop the owner's cached list.
  pub async fn create_note(&self, note: &Note) -> ApiResult<ApiResponse<Note>> {
    if note.id.is_some() {
      return Err(ApiError::validation("unexpected id"));
    }
    let response = self
      .backend
      .create_note(note)
      .await
      .map_err(failed(Operation::Create))?;
    self.invalidate_owner(note.user_id);
    info!("Note creation: {}", note.title);
    Ok(response)
  }

  /// List an owner's notes, served from the cache when an entry exists.
  pub async fn list_notes(&self, owner_id: u64) -> ApiResult<NoteList> {
    Ok(self.list_notes_with_source(owner_id).await?.data)
  }

  /// Like [`NoteService::list_notes`], also reporting whether the cache answered.
  pub async fn list_notes_with_source(&self, owner_id: u64) -> ApiResult<CacheResult<NoteList>> {
    let result = self
      .notes
      .fetch(owner_id, || self.fetch_notes(owner_id))
      .await?;
    if result.is_hit() {
      debug!("Fetching notes for user {} from cache", owner_id);
    } else {
      info!("Fetching notes for user {}", owner_id);
    }
    Ok(result)
  }

  /// List an owner's notes from the remote service, bypassing the cache.
  ///
  /// On success the fresh result replaces the cached one; on failure the
  /// cache is left as it was.
  pub async fn refresh_notes(&self, owner_id: u64) -> ApiResult<NoteList> {
    let result = self
      .notes
      .refresh(owner_id, || self.fetch_notes(owner_id))
      .await?;
    info!("Refreshed notes for user {}", owner_id);
    Ok(result.data)
  }

  /// Update a note and drop the owner's cached list.
  ///
  /// The note must carry its server-assigned id.
  pub async fn update_note(&self, note: &Note) -> ApiResult<ApiResponse<Note>> {
    let note_id = note.id.ok_or_else(|| ApiError::validation("missing id"))?;
    let response = self
      .backend
      .update_note(note_id, note)
      .await
      .map_err(failed(Operation::Update))?;
    self.invalidate_owner(note.user_id);
    info!("Note update: {}", note_id);
    Ok(response)
  }

  /// Delete a note and drop the cached list of `owner_id`.
  ///
  /// The owner cannot be derived from the id alone, so the caller supplies it.
  pub async fn delete_note(
    &self,
    note_id: Option<u64>,
    owner_id: u64,
  ) -> ApiResult<ApiResponse<Ack>> {
    let note_id = note_id.ok_or_else(|| ApiError::validation("missing id"))?;
    let response = self
      .backend
      .delete_note(note_id)
      .await
      .map_err(failed(Operation::Delete))?;
    self.invalidate_owner(owner_id);
    info!("Note deletion: {}", note_id);
    Ok(response)
  }

  /// Drop every cached list.
  pub fn clear_cache(&self) {
    self.notes.clear();
    debug!("Cleared note cache");
  }

  pub fn is_cached(&self, owner_id: u64) -> bool {
    self.notes.contains(&owner_id)
  }

  async fn fetch_notes(&self, owner_id: u64) -> ApiResult<NoteList> {
    self
      .backend
      .list_notes(owner_id)
      .await
      .map_err(failed(Operation::List))
  }

  fn invalidate_owner(&self, owner_id: u64) {
    if self.notes.invalidate(&owner_id) {
      debug!("Invalidated cached notes for user {}", owner_id);
    }
  }
}

fn validate_credentials(user: &User) -> ApiResult<()> {
  if user.username.is_empty() {
    return Err(ApiError::validation("missing username"));
  }
  if user.password.is_empty() {
    return Err(ApiError::validation("missing password"));
  }
  Ok(())
}

/// Log the transport error and reduce it to the operation kind.
fn failed(operation: Operation) -> impl FnOnce(Report) -> ApiError {
  move |e| {
    warn!("Request failed ({}): {:#}", operation, e);
    ApiError::OperationFailed(operation)
  }
}

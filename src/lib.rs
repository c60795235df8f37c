//! Client-side access to the NoteVault notes API.
//!
//! [`NoteService`] runs the user and note operations against the remote
//! service and keeps each owner's note list cached until a write for that
//! owner succeeds.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod service;
pub mod shared;

pub use api::{Ack, ApiResponse, Note, User};
pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use service::NoteService;

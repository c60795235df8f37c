//! Access to the remote NoteVault API.

mod backend;
mod client;
#[cfg(test)]
pub(crate) mod fake;
mod types;

pub use backend::{NoteBackend, Operation};
pub use client::HttpBackend;
pub use types::{Ack, ApiResponse, Note, User};

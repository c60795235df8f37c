//! The process-wide note service.
//!
//! The binary (or any other composition root) installs one instance at
//! startup; every later access returns that same instance, so all call
//! sites observe one cache table. There is no teardown.

use std::sync::OnceLock;

use crate::service::NoteService;

static SHARED: OnceLock<NoteService> = OnceLock::new();

/// Install `service` as the shared instance.
///
/// The first install wins. Later calls drop their argument and return the
/// instance already installed.
pub fn install(service: NoteService) -> &'static NoteService {
  SHARED.get_or_init(|| service)
}

/// Return the shared instance, constructing it with `init` on first access.
pub fn get_or_init(init: impl FnOnce() -> NoteService) -> &'static NoteService {
  SHARED.get_or_init(init)
}

pub fn get() -> Option<&'static NoteService> {
  SHARED.get()
}

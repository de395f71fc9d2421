//! Guaranteed release of refining entries
//!
//! A [`RefiningGuard`] is created as soon as a replacement ticket is issued
//! and lives for the whole replacement flow. Dropping it removes the
//! suggestion from the refining set, whether the flow succeeded, failed,
//! came back empty, or the future itself was dropped mid-await.

use super::state::{ReplacementTicket, Session};
use midi_domain::SuggestionId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lock a shared session.
///
/// The session is only mutated in short synchronous sections, so a poisoned
/// lock still holds consistent state and is recovered.
pub fn lock_session(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Releases a refining entry on drop
#[must_use = "dropping the guard immediately releases the refining entry"]
pub struct RefiningGuard {
    session: Arc<Mutex<Session>>,
    generation: u64,
    id: SuggestionId,
}

impl RefiningGuard {
    pub fn new(session: Arc<Mutex<Session>>, ticket: &ReplacementTicket) -> Self {
        Self {
            session,
            generation: ticket.generation,
            id: ticket.id.clone(),
        }
    }

    pub fn id(&self) -> &SuggestionId {
        &self.id
    }
}

impl Drop for RefiningGuard {
    fn drop(&mut self) {
        lock_session(&self.session).release(self.generation, &self.id);
    }
}

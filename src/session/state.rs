//! Session state machine: directory listing, search text, selection, and the
//! pedigree slot for the current selection.
//!
//! Network completions are delivered as events keyed by dog id, so a slow
//! response for a superseded selection is discarded instead of applied: last
//! selection wins, not last response. The session itself performs no I/O;
//! `select` and `retry` hand back the fetch the caller must start.

use crate::model::{AncestryNode, Dog};
use crate::render::PEDIGREE_DEPTH;

/// Pedigree slot for the current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PedigreeState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A fetch for `dog_id` is in flight.
    Loading { dog_id: u64 },
    Ready { dog_id: u64, tree: AncestryNode },
    Failed { dog_id: u64, error: String },
}

/// A pedigree fetch the caller must start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PedigreeRequest {
    pub dog_id: u64,
    pub depth: usize,
}

impl PedigreeRequest {
    fn new(dog_id: u64) -> Self {
        Self {
            dog_id,
            depth: PEDIGREE_DEPTH,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    listing: Vec<Dog>,
    query: String,
    selected: Option<Dog>,
    pedigree: PedigreeState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listing(&self) -> &[Dog] {
        &self.listing
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> Option<&Dog> {
        self.selected.as_ref()
    }

    pub fn pedigree(&self) -> &PedigreeState {
        &self.pedigree
    }

    /// Replace the directory listing wholesale, preserving the server's
    /// ordering. Selection and pedigree are independent axes and are never
    /// touched by a listing refresh.
    pub fn set_listing(&mut self, dogs: Vec<Dog>) {
        self.listing = dogs;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Select `dog`. Any previously loaded pedigree is dropped immediately
    /// (no stale display) and a fresh fetch must be started.
    pub fn select(&mut self, dog: Dog) -> PedigreeRequest {
        let dog_id = dog.id;
        self.selected = Some(dog);
        self.pedigree = PedigreeState::Loading { dog_id };
        PedigreeRequest::new(dog_id)
    }

    /// Drop selection and pedigree, synchronously. In-flight fetches are not
    /// cancelled; their completions no longer match and get discarded.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.pedigree = PedigreeState::Idle;
    }

    /// Apply a completed fetch. Returns false when the result belongs to a
    /// selection that has since changed or been cleared and was discarded.
    pub fn pedigree_loaded(&mut self, dog_id: u64, tree: AncestryNode) -> bool {
        if self.loading_key() != Some(dog_id) {
            return false;
        }
        self.pedigree = PedigreeState::Ready { dog_id, tree };
        true
    }

    /// Record a failed fetch, under the same staleness rule as
    /// `pedigree_loaded`.
    pub fn pedigree_failed(&mut self, dog_id: u64, error: String) -> bool {
        if self.loading_key() != Some(dog_id) {
            return false;
        }
        self.pedigree = PedigreeState::Failed { dog_id, error };
        true
    }

    /// Re-issue the fetch after a failure. No-op unless the slot is `Failed`.
    pub fn retry(&mut self) -> Option<PedigreeRequest> {
        let PedigreeState::Failed { dog_id, .. } = &self.pedigree else {
            return None;
        };
        let dog_id = *dog_id;
        self.pedigree = PedigreeState::Loading { dog_id };
        Some(PedigreeRequest::new(dog_id))
    }

    fn loading_key(&self) -> Option<u64> {
        match self.pedigree {
            PedigreeState::Loading { dog_id } => Some(dog_id),
            _ => None,
        }
    }
}

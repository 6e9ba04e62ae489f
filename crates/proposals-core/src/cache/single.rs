use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::Proposal;

/// A proposal together with the moment it was cached.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedProposal {
    pub proposal: Proposal,
    pub cached_at: DateTime<Utc>,
}

impl CachedProposal {
    pub fn new(proposal: Proposal) -> Self {
        Self {
            proposal,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }
}

/// Cache consulted by `ProposalStore` before fetching a proposal by id.
pub trait ProposalCache: Send + Sync {
    /// The cached proposal, only if its id equals `id`.
    fn get(&self, id: &str) -> Option<Proposal>;

    /// Remember `proposal`, replacing whatever was cached.
    fn set(&self, proposal: Proposal);

    fn clear(&self);

    /// The current entry regardless of id.
    fn peek(&self) -> Option<CachedProposal>;
}

/// Holds at most one proposal. The last `set` wins.
#[derive(Debug, Default)]
pub struct SingleEntryCache {
    slot: RwLock<Option<CachedProposal>>,
}

impl SingleEntryCache {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is ignored: writers only ever store a complete entry.
    fn read(&self) -> RwLockReadGuard<'_, Option<CachedProposal>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<CachedProposal>> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProposalCache for SingleEntryCache {
    fn get(&self, id: &str) -> Option<Proposal> {
        self.read()
            .as_ref()
            .filter(|entry| entry.proposal.id == id)
            .map(|entry| entry.proposal.clone())
    }

    fn set(&self, proposal: Proposal) {
        let mut slot = self.write();
        if let Some(ref previous) = *slot {
            if previous.proposal.id != proposal.id {
                debug!(
                    evicted = %previous.proposal.id,
                    age = %previous.age_display(),
                    "Replacing cached proposal"
                );
            }
        }
        *slot = Some(CachedProposal::new(proposal));
    }

    fn clear(&self) {
        *self.write() = None;
    }

    fn peek(&self) -> Option<CachedProposal> {
        self.read().clone()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Proposal and activity data access.
//!
//! `ProposalStore` wraps an `ApiClient` and a `ProposalCache`. Every
//! operation returns `Result<T, ApiError>`; callers that prefer the
//! "empty, false or absent on failure" behaviour use `ProposalStore::lenient`.
//!
//! The cache is written only by a successful `get_proposal` fetch. Creating,
//! deleting or listing never touches it, so a deleted proposal can still be
//! served from the cache until another id is fetched or the caller calls
//! `invalidate_cache`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::cache::{CachedProposal, ProposalCache, SingleEntryCache};
use crate::models::{Activity, NewProposal, Proposal};

/// Log a failed operation once at the store boundary and pass the result on.
fn logged<T>(operation: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(ref e) = result {
        warn!(operation, error = %e, "Operation failed");
    }
    result
}

/// Clone is cheap - the client and the cache are shared.
#[derive(Clone)]
pub struct ProposalStore {
    client: ApiClient,
    cache: Arc<dyn ProposalCache>,
}

impl ProposalStore {
    /// Create a store with a fresh `SingleEntryCache`
    pub fn new(client: ApiClient) -> Self {
        Self::with_cache(client, Arc::new(SingleEntryCache::new()))
    }

    pub fn with_cache(client: ApiClient, cache: Arc<dyn ProposalCache>) -> Self {
        Self { client, cache }
    }

    /// The proposal currently held by the cache, if any
    pub fn cached(&self) -> Option<CachedProposal> {
        self.cache.peek()
    }

    pub fn invalidate_cache(&self) {
        debug!("Clearing proposal cache");
        self.cache.clear();
    }

    /// View of this store that substitutes defaults for failures.
    pub fn lenient(&self) -> LenientStore<'_> {
        LenientStore { store: self }
    }

    // ===== Proposals =====

    pub async fn list_proposals(&self) -> Result<Vec<Proposal>, ApiError> {
        logged("list_proposals", self.client.fetch_proposals().await)
    }

    /// Serve `id` from the cache when it holds that proposal; otherwise fetch
    /// it and make it the cached entry.
    pub async fn get_proposal(&self, id: &str) -> Result<Proposal, ApiError> {
        if let Some(proposal) = self.cache.get(id) {
            debug!(id, "Proposal served from cache");
            return Ok(proposal);
        }

        let proposal = logged("get_proposal", self.client.fetch_proposal(id).await)?;
        debug!(id, "Fetched proposal");
        self.cache.set(proposal.clone());
        Ok(proposal)
    }

    pub async fn add_proposal(
        &self,
        name: &str,
        activities: Vec<Activity>,
    ) -> Result<Proposal, ApiError> {
        let body = NewProposal::new(name, activities);
        let created = logged("add_proposal", self.client.create_proposal(&body).await)?;
        debug!(id = %created.id, "Added proposal");
        Ok(created)
    }

    pub async fn delete_proposal(&self, id: &str) -> Result<(), ApiError> {
        logged("delete_proposal", self.client.delete_proposal(id).await)?;
        debug!(id, "Deleted proposal");
        Ok(())
    }

    // ===== Activities =====

    /// Resolve the parent proposal first; no activity request is made if
    /// that fails.
    pub async fn get_activity(
        &self,
        proposal_id: &str,
        activity_id: i64,
    ) -> Result<Activity, ApiError> {
        self.get_proposal(proposal_id).await?;
        let activity = logged(
            "get_activity",
            self.client.fetch_activity(proposal_id, activity_id).await,
        )?;
        debug!(proposal_id, activity_id, "Fetched activity");
        Ok(activity)
    }

    /// Resolve the parent proposal first; nothing is posted if that fails.
    pub async fn add_activity(
        &self,
        proposal_id: &str,
        activity_id: i64,
    ) -> Result<Activity, ApiError> {
        self.get_proposal(proposal_id).await?;
        let activity = logged(
            "add_activity",
            self.client.create_activity(proposal_id, activity_id).await,
        )?;
        debug!(proposal_id, activity_id, "Added activity");
        Ok(activity)
    }
}

/// Borrowed view of a `ProposalStore` that never fails: errors (already
/// logged by the store) become an empty list, `false` or `None`.
pub struct LenientStore<'a> {
    store: &'a ProposalStore,
}

impl LenientStore<'_> {
    fn absent<T>(operation: &str, result: Result<T, ApiError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                debug!(operation, "Substituting empty result");
                None
            }
        }
    }

    pub async fn list_proposals(&self) -> Vec<Proposal> {
        Self::absent("list_proposals", self.store.list_proposals().await).unwrap_or_default()
    }

    pub async fn get_proposal(&self, id: &str) -> Option<Proposal> {
        Self::absent("get_proposal", self.store.get_proposal(id).await)
    }

    pub async fn add_proposal(&self, name: &str, activities: Vec<Activity>) -> Option<Proposal> {
        Self::absent("add_proposal", self.store.add_proposal(name, activities).await)
    }

    /// `true` when the server confirmed the deletion.
    pub async fn delete_proposal(&self, id: &str) -> bool {
        Self::absent("delete_proposal", self.store.delete_proposal(id).await).is_some()
    }

    pub async fn get_activity(&self, proposal_id: &str, activity_id: i64) -> Option<Activity> {
        Self::absent(
            "get_activity",
            self.store.get_activity(proposal_id, activity_id).await,
        )
    }

    pub async fn add_activity(&self, proposal_id: &str, activity_id: i64) -> Option<Activity> {
        Self::absent(
            "add_activity",
            self.store.add_activity(proposal_id, activity_id).await,
        )
    }
}

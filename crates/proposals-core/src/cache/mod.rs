//! In-memory caching of fetched proposals.
//!
//! The store owns a `ProposalCache`; the default implementation is
//! `SingleEntryCache`, which remembers only the proposal most recently
//! fetched by id. Nothing here expires or invalidates entries on its own.

pub mod single;

pub use single::{CachedProposal, ProposalCache, SingleEntryCache};

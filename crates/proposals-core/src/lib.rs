//! Client library for managing proposals and their activities.
//!
//! - `api`: typed REST client over a pluggable HTTP transport
//! - `cache`: the single-entry proposal cache
//! - `store`: `ProposalStore`, the data-access layer used by front-ends
//! - `models`: `Proposal`, `Activity`, `Game`
//! - `auth`, `routes`: the admin login gate and the route table
//! - `config`: on-disk and environment configuration

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod routes;
pub mod store;

pub use api::{ApiClient, ApiError};
pub use cache::{ProposalCache, SingleEntryCache};
pub use config::Config;
pub use routes::Route;
pub use store::{LenientStore, ProposalStore};

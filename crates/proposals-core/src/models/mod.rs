//! Data models for proposals and their activities.
//!
//! - `Proposal`, `NewProposal`: a named collection of activities
//! - `Activity`: an item owned by exactly one proposal
//! - `Game`: a proposal being played by a set of users

pub mod activity;
pub mod game;
pub mod proposal;

pub use activity::Activity;
pub use game::Game;
pub use proposal::{NewProposal, Proposal};

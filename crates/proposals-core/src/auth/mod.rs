//! Login gate for the admin area.
//!
//! `LoginGate` compares a username and password against the configured admin
//! credentials and, on a match, names the route to navigate to. There are no
//! tokens or sessions; nothing is sent to the API.

pub mod gate;

pub use gate::LoginGate;

use tracing::{info, warn};

use crate::config::Config;
use crate::routes::Route;

pub struct LoginGate {
    username: String,
    password: String,
}

impl LoginGate {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }

    /// `Some(Route::Admin)` when both values match, otherwise `None`.
    pub fn check(&self, username: &str, password: &str) -> Option<Route> {
        if username == self.username && password == self.password {
            info!(username, "Admin login accepted");
            Some(Route::Admin)
        } else {
            warn!(username, "Admin login rejected");
            None
        }
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

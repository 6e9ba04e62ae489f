//! Static client-side route table.
//!
//! | Path             | Route            |
//! |------------------|------------------|
//! | `` (empty)       | redirects to `home` |
//! | `home`           | `Route::Home`    |
//! | `proposal`       | `Route::Proposal`|
//! | `game/:gameUrl`  | `Route::Game`    |
//! | `admin`          | `Route::Admin`   |

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Proposal,
    Game { game_url: String },
    Admin,
}

impl Route {
    /// Match a path against the table. Leading and trailing slashes are ignored.
    pub fn resolve(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_matches('/');
        let mut segments = trimmed.split('/');
        let route = match (segments.next(), segments.next()) {
            (Some(""), None) | (Some("home"), None) => Route::Home,
            (Some("proposal"), None) => Route::Proposal,
            (Some("admin"), None) => Route::Admin,
            (Some("game"), Some(game_url)) if !game_url.is_empty() => Route::Game {
                game_url: game_url.to_string(),
            },
            _ => return None,
        };
        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/home".to_string(),
            Route::Proposal => "/proposal".to_string(),
            Route::Game { game_url } => format!("/game/{}", game_url),
            Route::Admin => "/admin".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

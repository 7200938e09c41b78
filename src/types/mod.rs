use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::services::{CredentialService, FileService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub files: FileService,
    pub credentials: CredentialService,
    pub key: Key,
}

impl AppState {
    /// Build the shared state from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            files: FileService::new(config.data_dir.clone()),
            credentials: CredentialService::new(config.users_path.clone()),
            key: config.session_key(),
        }
    }
}

// Lets the private cookie jar pull its encryption key out of the state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}

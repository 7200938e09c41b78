use std::env;
use std::path::PathBuf;

use axum_extra::extract::cookie::Key;

/// Application configuration and constants
pub struct Config {
    pub data_dir: PathBuf,
    pub users_path: PathBuf,
    pub port: u16,
    pub host: String,
    session_secret: Option<String>,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            users_path: PathBuf::from("users.toml"),
            port: 5006,
            host: "0.0.0.0".to_string(),
            session_secret: None,
        }
    }

    /// Build configuration from the process environment.
    ///
    /// `QUILL_ENV=test` switches both the documents root and the users file
    /// to the test tree so tests never touch real content.
    pub fn from_env() -> Self {
        let test_mode = env::var("QUILL_ENV")
            .map(|v| v == "test")
            .unwrap_or(false);

        let (data_dir, users_path) = if test_mode {
            (PathBuf::from("test/data"), PathBuf::from("test/users.toml"))
        } else {
            (PathBuf::from("data"), PathBuf::from("users.toml"))
        };

        let port = env::var("QUILL_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5006);

        Self {
            data_dir,
            users_path,
            port,
            host: "0.0.0.0".to_string(),
            session_secret: env::var("QUILL_SESSION_SECRET").ok(),
        }
    }

    /// Create configuration with custom roots
    pub fn with_roots(data_dir: PathBuf, users_path: PathBuf) -> Self {
        Self {
            data_dir,
            users_path,
            port: 5006,
            host: "0.0.0.0".to_string(),
            session_secret: None,
        }
    }

    /// Key used to encrypt the session cookie.
    ///
    /// Derived from the configured secret when one is set; otherwise a fresh
    /// key is generated, which invalidates existing sessions on restart.
    pub fn session_key(&self) -> Key {
        match &self.session_secret {
            Some(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
            Some(_) => {
                log::warn!("QUILL_SESSION_SECRET shorter than 64 bytes, generating a random key");
                Key::generate()
            }
            None => Key::generate(),
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roots() {
        let config = Config::new();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.users_path, PathBuf::from("users.toml"));
        assert_eq!(config.socket_addr().port(), 5006);
    }

    #[test]
    fn custom_roots() {
        let config = Config::with_roots(
            PathBuf::from("test/data"),
            PathBuf::from("test/users.toml"),
        );
        assert_eq!(config.data_dir, PathBuf::from("test/data"));
        assert_eq!(config.users_path, PathBuf::from("test/users.toml"));
    }

    #[test]
    fn key_is_generated_without_a_secret() {
        // no secret configured; must not panic
        let _ = Config::new().session_key();
    }
}

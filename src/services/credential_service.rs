use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{debug, info, warn};

use crate::errors::CmsError;

/// Service for the credential store: a TOML file mapping each username to
/// a bcrypt hash of its password.
///
/// The whole mapping is read and rewritten on every change; `register`
/// holds the writer lock across its read-modify-write so two sign-ups in
/// this process cannot drop each other's record.
#[derive(Clone)]
pub struct CredentialService {
    store_path: PathBuf,
    cost: u32,
    write_lock: Arc<Mutex<()>>,
}

impl CredentialService {
    /// Create a new credential service backed by the given store file
    pub fn new(store_path: PathBuf) -> Self {
        debug!("Creating CredentialService with store: {:?}", store_path);
        Self {
            store_path,
            cost: bcrypt::DEFAULT_COST,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Override the bcrypt cost factor (tests use the minimum)
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Load the full username -> hash mapping.
    ///
    /// An absent or blank store file is an empty mapping, not an error.
    pub fn load_all(&self) -> Result<BTreeMap<String, String>, CmsError> {
        if !self.store_path.is_file() {
            debug!("Credential store absent: {:?}", self.store_path);
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(&self.store_path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let users: BTreeMap<String, String> = toml::from_str(&raw)?;
        debug!("Loaded {} credential records", users.len());
        Ok(users)
    }

    /// Serialize the full mapping and overwrite the store file
    pub fn save_all(&self, users: &BTreeMap<String, String>) -> Result<(), CmsError> {
        let serialized = toml::to_string(users)?;
        if let Some(parent) = self.store_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.store_path, serialized)?;
        info!("Saved {} credential records", users.len());
        Ok(())
    }

    /// Check a candidate password against the stored hash for a username.
    ///
    /// An unknown username verifies false rather than erroring, and so does
    /// a stored hash bcrypt cannot parse.
    pub fn verify(&self, user: &str, pass: &str) -> Result<bool, CmsError> {
        let users = self.load_all()?;
        let Some(hash) = users.get(user) else {
            return Ok(false);
        };

        match bcrypt::verify(pass, hash) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                warn!("Stored hash for {:?} failed to verify: {}", user, e);
                Ok(false)
            }
        }
    }

    /// Sign-up uniqueness rule: taken when the username exists, or when the
    /// candidate password matches ANY existing user's password.
    pub fn is_taken(&self, user: &str, pass: &str) -> Result<bool, CmsError> {
        let users = self.load_all()?;
        if users.contains_key(user) {
            return Ok(true);
        }
        let collides = users
            .values()
            .any(|hash| bcrypt::verify(pass, hash).unwrap_or(false));
        Ok(collides)
    }

    /// Hash the password and persist the record.
    ///
    /// This is a blind upsert; callers run the uniqueness check first.
    pub fn register(&self, user: &str, pass: &str) -> Result<(), CmsError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut users = self.load_all()?;
        let hash = bcrypt::hash(pass, self.cost)?;
        users.insert(user.to_string(), hash);
        self.save_all(&users)?;

        info!("Registered credential record for {:?}", user);
        Ok(())
    }
}

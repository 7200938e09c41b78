//! Quill - a small flat-file CMS
//!
//! Documents live as plain files under a content directory; markdown files
//! are rendered to HTML on the way out. Signed-in users can create, edit,
//! and delete documents. Credentials are bcrypt hashes kept in a single
//! TOML file.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod session;
pub mod templates;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::CmsError;
pub use handlers::router;
pub use services::{CredentialService, FileService, MarkdownService};
pub use session::Session;
pub use types::AppState;

pub use utils::{escape_attr, escape_html};

pub mod credential_service;
pub mod file_service;
pub mod markdown_service;

pub use credential_service::CredentialService;
pub use file_service::FileService;
pub use markdown_service::MarkdownService;

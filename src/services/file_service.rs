use std::fs::{self, OpenOptions};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, error, info, warn};

use crate::errors::CmsError;
use crate::utils::modified_rfc3339;

/// Service for document storage under a single flat directory.
///
/// Every operation reads or writes the live filesystem; there is no index
/// and no cache. Mutations take the writer lock so this process never
/// interleaves its own writes to the documents root.
#[derive(Clone)]
pub struct FileService {
    data_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileService {
    /// Create a new file service
    pub fn new(data_dir: PathBuf) -> Self {
        debug!("Creating FileService with data directory: {:?}", data_dir);
        Self {
            data_dir,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Resolve a document name to a path under the data directory.
    ///
    /// Names are single path segments; anything with a separator or parent
    /// component is rejected.
    fn resolve(&self, name: &str) -> Result<PathBuf, CmsError> {
        if name.is_empty() {
            return Err(CmsError::InvalidName);
        }
        let path = Path::new(name);
        let mut components = path.components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.data_dir.join(name)),
            _ => {
                warn!("Rejected document name: {:?}", name);
                Err(CmsError::InvalidName)
            }
        }
    }

    /// List document names directly under the data directory.
    ///
    /// Directories and dotfiles are skipped. The result is sorted for a
    /// stable listing, but callers must not depend on the order.
    pub fn list(&self) -> Result<Vec<String>, CmsError> {
        debug!("Listing documents in {:?}", self.data_dir);

        if !self.data_dir.is_dir() {
            warn!("Data directory does not exist: {:?}", self.data_dir);
            return Err(CmsError::NotFound);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
                    let name = entry.file_name().to_string_lossy().to_string();
                    if is_file && !name.starts_with('.') {
                        names.push(name);
                    }
                }
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                }
            }
        }
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

        info!("Listed documents, found {} entries", names.len());
        Ok(names)
    }

    /// Read document content as raw bytes
    pub fn read(&self, name: &str) -> Result<Vec<u8>, CmsError> {
        let path = self.resolve(name)?;
        debug!("Reading document: {:?}", path);

        if !path.is_file() {
            warn!("Document does not exist: {:?}", path);
            return Err(CmsError::NotFound);
        }

        let bytes = fs::read(&path).map_err(|e| {
            error!("Failed to read document {:?}: {}", path, e);
            CmsError::Io(e)
        })?;

        info!("Read document {}, {} bytes", name, bytes.len());
        Ok(bytes)
    }

    /// Read document content as UTF-8 text
    pub fn read_to_string(&self, name: &str) -> Result<String, CmsError> {
        let bytes = self.read(name)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Overwrite (or create) the named document with the given content
    pub fn write(&self, name: &str, content: &str) -> Result<(), CmsError> {
        let path = self.resolve(name)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        fs::write(&path, content).map_err(|e| {
            error!("Failed to write document {:?}: {}", path, e);
            CmsError::Io(e)
        })?;

        info!("Wrote document {}, {} bytes", name, content.len());
        Ok(())
    }

    /// Create an empty document if absent; no-op when it already exists
    pub fn create(&self, name: &str) -> Result<(), CmsError> {
        let path = self.resolve(name)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        // append mode so an existing document is never truncated
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| {
                error!("Failed to create document {:?}: {}", path, e);
                CmsError::Io(e)
            })?;

        info!("Created document {}", name);
        Ok(())
    }

    /// Remove the named document; NotFound when absent
    pub fn delete(&self, name: &str) -> Result<(), CmsError> {
        let path = self.resolve(name)?;
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        if !path.is_file() {
            warn!("Cannot delete, document does not exist: {:?}", path);
            return Err(CmsError::NotFound);
        }

        fs::remove_file(&path).map_err(|e| {
            error!("Failed to delete document {:?}: {}", path, e);
            CmsError::Io(e)
        })?;

        info!("Deleted document {}", name);
        Ok(())
    }

    /// Check if a document exists
    pub fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => path.is_file(),
            Err(_) => false,
        }
    }

    /// Last-modified time of a document as RFC 3339, if available
    pub fn modified(&self, name: &str) -> Option<String> {
        let path = self.resolve(name).ok()?;
        modified_rfc3339(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (tempfile::TempDir, FileService) {
        let tmp = tempfile::tempdir().unwrap();
        let service = FileService::new(tmp.path().to_path_buf());
        (tmp, service)
    }

    #[test]
    fn list_skips_directories_and_dotfiles() {
        let (tmp, service) = service();
        fs::write(tmp.path().join("about.md"), "# About").unwrap();
        fs::write(tmp.path().join("changes.txt"), "").unwrap();
        fs::write(tmp.path().join(".hidden"), "").unwrap();
        fs::create_dir(tmp.path().join("subdir")).unwrap();

        let names = service.list().unwrap();
        assert_eq!(names, vec!["about.md", "changes.txt"]);
    }

    #[test]
    fn read_missing_is_not_found() {
        let (_tmp, service) = service();
        assert!(matches!(service.read("nope.txt"), Err(CmsError::NotFound)));
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_tmp, service) = service();
        service.write("notes.txt", "hello").unwrap();
        assert_eq!(service.read("notes.txt").unwrap(), b"hello");

        service.write("notes.txt", "replaced").unwrap();
        assert_eq!(service.read_to_string("notes.txt").unwrap(), "replaced");
    }

    #[test]
    fn create_is_idempotent_and_never_truncates() {
        let (_tmp, service) = service();
        service.create("new.txt").unwrap();
        assert_eq!(service.read("new.txt").unwrap(), b"");

        service.write("new.txt", "content").unwrap();
        service.create("new.txt").unwrap();
        assert_eq!(service.read_to_string("new.txt").unwrap(), "content");
    }

    #[test]
    fn delete_missing_is_not_found() {
        let (_tmp, service) = service();
        service.create("gone.txt").unwrap();
        service.delete("gone.txt").unwrap();
        assert!(!service.exists("gone.txt"));
        assert!(matches!(
            service.delete("gone.txt"),
            Err(CmsError::NotFound)
        ));
    }

    #[test]
    fn rejects_names_outside_the_data_dir() {
        let (_tmp, service) = service();
        assert!(matches!(service.create(""), Err(CmsError::InvalidName)));
        assert!(matches!(
            service.read("../secret.txt"),
            Err(CmsError::InvalidName)
        ));
        assert!(matches!(
            service.write("a/b.txt", "x"),
            Err(CmsError::InvalidName)
        ));
    }
}

//! JSON-file storage backend
//!
//! Layout: `<root>/profiles/<escaped profile>/<collection>.json`. Profile
//! names are free-form, so every byte outside `[A-Za-z0-9_-]` is written as
//! `%XX`; the empty name is stored as a lone `%`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use super::{StorageBackend, StorageKey, StoreError};
use crate::config::APP_NAME;

/// Stores each document as a JSON file under a root directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Backend rooted at `root` (created lazily on first write)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Backend rooted at the platform data directory
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", APP_NAME).ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir()))
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn path_for(&self, key: &StorageKey) -> PathBuf {
        self.profiles_dir()
            .join(escape_profile(&key.profile))
            .join(format!("{}.json", key.collection.name()))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &StorageKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn write(&mut self, key: &StorageKey, contents: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        // Write beside the target and rename so a crash never leaves half a file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;

        Ok(())
    }

    fn remove(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    fn profiles(&self) -> Result<Vec<String>, StoreError> {
        let dir = self.profiles_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let raw = entry.file_name().to_string_lossy().into_owned();
            names.push(unescape_profile(&raw)?);
        }

        names.sort();
        Ok(names)
    }
}

/// Encode a profile name as a safe directory name
pub fn escape_profile(name: &str) -> String {
    if name.is_empty() {
        return "%".to_string();
    }

    let mut escaped = String::with_capacity(name.len());
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

/// Decode a directory name produced by [`escape_profile`]
pub fn unescape_profile(escaped: &str) -> Result<String, StoreError> {
    if escaped == "%" {
        return Ok(String::new());
    }

    let invalid = || StoreError::InvalidProfileName(escaped.to_string());
    let bytes = escaped.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = escaped.get(i + 1..i + 3).ok_or_else(invalid)?;
            decoded.push(u8::from_str_radix(hex, 16).map_err(|_| invalid())?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::store::Collection;

    #[test]
    fn escaping_is_reversible() {
        for name in ["Asha", "two words", "ರಾಮ", "a/b\\c", "%", "", "x-y_z"] {
            let escaped = escape_profile(name);
            assert!(escaped.chars().all(|c| c.is_ascii_alphanumeric() || "%_-".contains(c)));
            assert_eq!(unescape_profile(&escaped).unwrap(), name);
        }
    }

    #[test]
    fn malformed_escape_is_rejected() {
        assert!(unescape_profile("ab%2").is_err());
        assert!(unescape_profile("%ZZ").is_err());
    }

    #[test]
    fn write_read_remove_on_disk() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());
        let key = StorageKey::new(Collection::MasteryMap, "Big Sis");

        assert_eq!(backend.read(&key).unwrap(), None);

        backend.write(&key, "{}").unwrap();
        assert_eq!(backend.read(&key).unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("profiles/Big%20Sis/mastery_v1.json").exists());

        backend.write(&key, r#"{"a":1}"#).unwrap();
        assert_eq!(backend.read(&key).unwrap().as_deref(), Some(r#"{"a":1}"#));

        backend.remove(&key).unwrap();
        backend.remove(&key).unwrap();
        assert_eq!(backend.read(&key).unwrap(), None);
    }

    #[test]
    fn lists_profiles_from_directories() {
        let dir = TempDir::new().unwrap();
        let mut backend = FileBackend::new(dir.path());
        assert!(backend.profiles().unwrap().is_empty());

        backend.write(&StorageKey::new(Collection::TvMinutes, "zoe"), "1").unwrap();
        backend.write(&StorageKey::new(Collection::TvMinutes, "Al B"), "1").unwrap();

        assert_eq!(backend.profiles().unwrap(), vec!["Al B", "zoe"]);
    }
}

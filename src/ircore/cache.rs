use std::collections::HashMap;
use std::hash::Hasher;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use siphasher::sip::SipHasher24;
use super::CACHE_KEY_PREFIX;
use super::error::CacheError;
use super::utils::serialize::{read_file, write_file};

/// Advisory store of token sequences keyed by document content.
///
/// Implementations may fail freely: the indexer logs the error and carries on
/// as if the entry were missing.
pub trait TokenCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, CacheError>;
    fn set(&self, key: &str, tokens: &[String]) -> Result<(), CacheError>;
}

/// Cache key for a document's raw bytes.
pub fn cache_key(raw: &[u8]) -> String {
    let mut hasher = SipHasher24::new();
    hasher.write(raw);
    format!("{}{:016x}", CACHE_KEY_PREFIX, hasher.finish())
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, tokens: &[String]) -> Result<(), CacheError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), tokens.to_vec());
        Ok(())
    }
}

/// One bincode file per key under a directory.
#[derive(Debug)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    pub fn new(dir: &Path) -> Self {
        DirCache { dir: dir.to_path_buf() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.bin", key))
    }
}

impl TokenCache for DirCache {
    fn get(&self, key: &str) -> Result<Option<Vec<String>>, CacheError> {
        let path = self.entry_path(key);
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(read_file(&path)?))
    }

    fn set(&self, key: &str, tokens: &[String]) -> Result<(), CacheError> {
        write_file(&self.entry_path(key), &tokens)
    }
}

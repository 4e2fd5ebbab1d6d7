use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// One mutual-exclusion token per working directory.
///
/// CVS keeps its bookkeeping in the `CVS/` folder of each directory, so two
/// clients running in the same directory must not overlap. Calls in different
/// directories proceed in parallel.
#[derive(Debug, Default)]
pub struct DirectoryLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DirectoryLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the token for `directory` (`None` is the
    /// current directory). The token is forgotten once nobody holds or waits
    /// for it.
    pub fn with_lock<T>(&self, directory: Option<&str>, f: impl FnOnce() -> T) -> T {
        let key = directory_key(directory);
        let lock = self.lock_for(&key);
        let value = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        self.release(&key, lock);
        value
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    fn release(&self, key: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(key);
        }
    }
}

/// Registry key for a working directory. Separator style and trailing
/// separators do not matter.
pub(crate) fn directory_key(directory: Option<&str>) -> String {
    let Some(directory) = directory else {
        return ".".to_string();
    };
    let normalized = directory.replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    match (trimmed.is_empty(), normalized.is_empty()) {
        (false, _) => trimmed.to_string(),
        (true, true) => ".".to_string(),
        (true, false) => "/".to_string(),
    }
}

use std::path::Path;

/// Answers whether a tracked file still exists before its status is queried.
pub trait PathProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

#[derive(Debug, Default, Clone)]
pub struct FileSystemProbe;

impl PathProbe for FileSystemProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

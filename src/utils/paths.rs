//! Path utility functions

use std::path::{Component, Path, PathBuf};

/// Re-root an absolute path under `root`: ("/home/u", "/Applications/X") gives
/// "/home/u/Applications/X". Relative paths are joined as they are.
pub fn rebase_under(root: &Path, p: &Path) -> PathBuf {
    let rel: PathBuf = p
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(rel)
}

/// True if the path can be stat'ed.
pub fn exists(p: &Path) -> bool {
    std::fs::metadata(p).is_ok()
}

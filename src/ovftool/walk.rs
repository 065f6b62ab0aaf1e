//! Short-circuit directory walks

use crate::error::LocateError;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// What the walk does after a visited entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// Do not descend into this directory (same as Continue for files)
    SkipSubtree,
    /// End the walk; not an error
    Stop,
}

/// Visit `root` and everything below it in lexical order until `visit` says
/// [`WalkControl::Stop`]. The first traversal error ends the walk.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<(), walkdir::Error>
where
    F: FnMut(&DirEntry) -> WalkControl,
{
    let mut it = WalkDir::new(root).sort_by_file_name().into_iter();
    while let Some(entry) = it.next() {
        let entry = entry?;
        match visit(&entry) {
            WalkControl::Continue => {}
            WalkControl::SkipSubtree => {
                if entry.file_type().is_dir() {
                    it.skip_current_dir();
                }
            }
            WalkControl::Stop => break,
        }
    }
    Ok(())
}

/// True if the last component of `path` is `name`, ignoring case.
pub fn file_name_matches(path: &Path, name: &str) -> bool {
    path.file_name()
        .is_some_and(|f| f.to_string_lossy().to_lowercase() == name.to_lowercase())
}

/// Find the first file below `root` named `name` (ignoring case) that
/// resolves as an executable.
pub fn find_executable(root: &Path, name: &str) -> Result<PathBuf, LocateError> {
    let mut found = None;
    walk(root, |entry| {
        if entry.file_type().is_dir() || !file_name_matches(entry.path(), name) {
            return WalkControl::Continue;
        }
        match which::which(entry.path()) {
            Ok(path) => {
                found = Some(path);
                WalkControl::Stop
            }
            Err(_) => WalkControl::Continue,
        }
    })
    .map_err(|source| LocateError::Walk {
        root: root.to_path_buf(),
        source,
    })?;

    found.ok_or_else(|| LocateError::NotFound {
        name: name.to_string(),
    })
}

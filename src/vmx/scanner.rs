//! Scanning a parent directory for versioned VMX directories

use crate::error::{EntryError, ScanError};
use crate::vmx::format::VersionFormat;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of the configuration file expected in every versioned directory
pub const VMX_EXTENSION: &str = "vmx";

/// A versioned directory holding a single .vmx file
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VmxEntry {
    pub dirname: PathBuf, // absolute directory path
    pub path: PathBuf,    // absolute .vmx file path
    pub name: String,     // .vmx file name
    pub version: u64,
}

/// Find the one .vmx file directly inside `dir`.
pub fn find_vmx_file(dir: &Path) -> Result<PathBuf, EntryError> {
    let io_err = |source| EntryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let suffix = format!(".{VMX_EXTENSION}");

    let mut matches = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let file_name = entry.file_name();
        if file_name.to_str().is_some_and(|n| n.ends_with(&suffix)) {
            matches.push(entry.path());
        }
    }
    matches.sort();

    match matches.len() {
        0 => return Err(EntryError::MissingConfigFile(dir.to_path_buf())),
        1 => {}
        _ => {
            return Err(EntryError::AmbiguousConfigFile {
                dir: dir.to_path_buf(),
                files: matches,
            })
        }
    }

    let path = matches.remove(0);
    let meta = fs::metadata(&path).map_err(|source| EntryError::Io {
        path: path.clone(),
        source,
    })?;
    if meta.is_dir() {
        return Err(EntryError::ConfigIsDirectory {
            dir: dir.to_path_buf(),
            path,
        });
    }
    Ok(path)
}

/// Return the VMX entries in `dir` whose names match `format`, sorted by
/// version. `format` scans the version ("vmx-%d") and selects candidates
/// ("vmx-%d" becomes "vmx-*").
pub fn read_vmx_dir(dir: impl AsRef<Path>, format: &str) -> Result<Vec<VmxEntry>, ScanError> {
    read_vmx_dir_with(dir, format, |_, _| {})
}

/// Like [`read_vmx_dir`], reporting every skipped child to `on_skip`.
pub fn read_vmx_dir_with<F>(
    dir: impl AsRef<Path>,
    format: &str,
    mut on_skip: F,
) -> Result<Vec<VmxEntry>, ScanError>
where
    F: FnMut(&Path, &EntryError),
{
    let format = VersionFormat::parse(format)?;
    let pattern = format.glob_pattern()?;

    let dir = dir.as_ref();
    let dir = dir
        .absolutize()
        .map_err(|source| ScanError::PathResolution {
            path: dir.to_path_buf(),
            source,
        })?
        .into_owned();

    let read_err = |source| ScanError::DirectoryRead {
        path: dir.clone(),
        source,
    };
    let mut children = fs::read_dir(&dir)
        .map_err(read_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    if children.is_empty() {
        return Err(ScanError::EmptyDirectory(dir));
    }
    children.sort_by_key(|e| e.file_name());

    let mut entries = Vec::new();
    for child in children {
        if !child.file_type().map_err(read_err)?.is_dir() {
            continue;
        }
        let file_name = child.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !pattern.matches(name) {
            continue;
        }
        let child_dir = dir.join(name);
        let version = match format.scan(name) {
            Ok(v) => v,
            Err(e) => {
                on_skip(&child_dir, &e);
                continue;
            }
        };
        let path = match find_vmx_file(&child_dir) {
            Ok(p) => p,
            Err(e) => {
                on_skip(&child_dir, &e);
                continue;
            }
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        entries.push(VmxEntry {
            dirname: child_dir,
            path,
            name,
            version,
        });
    }

    if entries.is_empty() {
        return Err(ScanError::EmptyDirectory(dir));
    }
    entries.sort_by_key(|e| e.version);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn vmx_dir(root: &Path, name: &str, files: &[&str]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for f in files {
            File::create(dir.join(f)).unwrap();
        }
        dir
    }

    #[test]
    fn test_sorted_by_version() {
        let temp = TempDir::new().unwrap();
        vmx_dir(temp.path(), "vmx-2", &["two.vmx"]);
        vmx_dir(temp.path(), "vmx-1", &["one.vmx"]);
        vmx_dir(temp.path(), "vmx-10", &["ten.vmx", "notes.txt"]);

        let entries = read_vmx_dir(temp.path(), "vmx-%d").unwrap();
        let versions: Vec<u64> = entries.iter().map(|e| e.version).collect();
        assert_eq!(versions, vec![1, 2, 10]);
        assert_eq!(entries[2].name, "ten.vmx");
    }

    #[test]
    fn test_trailing_name_text() {
        let temp = TempDir::new().unwrap();
        vmx_dir(temp.path(), "vmx-1-old", &["a.vmx"]);

        let entries = read_vmx_dir(temp.path(), "vmx-%d").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].version, 1);
        assert!(entries[0].dirname.ends_with("vmx-1-old"));
    }

    #[test]
    fn test_entry_paths() {
        let temp = TempDir::new().unwrap();
        vmx_dir(temp.path(), "vmx-3", &["a.vmx"]);
        vmx_dir(temp.path(), "vmx-4", &["b.vmx"]);

        for e in read_vmx_dir(temp.path(), "vmx-%d").unwrap() {
            assert!(e.dirname.is_absolute());
            assert_eq!(e.path.parent(), Some(e.dirname.as_path()));
            assert_eq!(e.path.file_name().unwrap().to_str(), Some(e.name.as_str()));
        }
    }

    #[test]
    fn test_skips_invalid_children() {
        let temp = TempDir::new().unwrap();
        vmx_dir(temp.path(), "vmx-1", &["ok.vmx"]);
        vmx_dir(temp.path(), "vmx-2", &[]);
        vmx_dir(temp.path(), "vmx-3", &["a.vmx", "b.vmx"]);
        vmx_dir(temp.path(), "vmx-x", &["bad.vmx"]);
        vmx_dir(temp.path(), "other-4", &["other.vmx"]);
        let nested = vmx_dir(temp.path(), "vmx-5", &[]);
        fs::create_dir(nested.join("dir.vmx")).unwrap();
        File::create(temp.path().join("vmx-6")).unwrap();

        let mut skipped = Vec::new();
        let entries = read_vmx_dir_with(temp.path(), "vmx-%d", |p, e| {
            skipped.push((p.file_name().unwrap().to_owned(), e.to_string()));
        })
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].version, 1);
        let names: Vec<_> = skipped.iter().map(|(n, _)| n.to_str().unwrap()).collect();
        assert_eq!(names, vec!["vmx-2", "vmx-3", "vmx-5", "vmx-x"]);
        assert!(skipped[1].1.contains("multiple vmx files"));
    }

    #[test]
    fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let err = read_vmx_dir(temp.path(), "vmx-%d").unwrap_err();
        assert!(matches!(err, ScanError::EmptyDirectory(_)));

        vmx_dir(temp.path(), "unrelated", &["x.vmx"]);
        vmx_dir(temp.path(), "vmx-1", &[]);
        let err = read_vmx_dir(temp.path(), "vmx-%d").unwrap_err();
        assert!(matches!(err, ScanError::EmptyDirectory(_)));
    }

    #[test]
    fn test_invalid_format() {
        let temp = TempDir::new().unwrap();
        vmx_dir(temp.path(), "vmx-1", &["a.vmx"]);
        for format in ["vmx", "vmx-%d-%d"] {
            let err = read_vmx_dir(temp.path(), format).unwrap_err();
            assert!(matches!(err, ScanError::InvalidFormat(_)));
        }
    }

    #[test]
    fn test_missing_directory() {
        let temp = TempDir::new().unwrap();
        let err = read_vmx_dir(temp.path().join("missing"), "vmx-%d").unwrap_err();
        assert!(matches!(err, ScanError::DirectoryRead { .. }));
    }

    #[test]
    fn test_find_vmx_file() {
        let temp = TempDir::new().unwrap();
        let dir = vmx_dir(temp.path(), "one", &["a.vmx", "a.vmdk"]);
        assert_eq!(find_vmx_file(&dir).unwrap(), dir.join("a.vmx"));

        let dir = vmx_dir(temp.path(), "none", &["a.vmdk"]);
        assert!(matches!(
            find_vmx_file(&dir),
            Err(EntryError::MissingConfigFile(_))
        ));

        let dir = vmx_dir(temp.path(), "two", &["a.vmx", "b.vmx"]);
        match find_vmx_file(&dir) {
            Err(EntryError::AmbiguousConfigFile { files, .. }) => assert_eq!(files.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }
}

//! Error types for VMX scanning, ovftool discovery and settings

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures that abort a whole VMX directory scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid format string: {0:?} (expected exactly one %d)")]
    InvalidFormat(String),

    #[error("cannot resolve path {path}: {source}")]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read vmx directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("empty vmx directory: {0}")]
    EmptyDirectory(PathBuf),
}

/// Soft failures: the child directory is left out of the scan result.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("directory name {name:?} does not match format {format:?}")]
    MalformedEntry { name: String, format: String },

    #[error("vmx file not found in directory: {0}")]
    MissingConfigFile(PathBuf),

    #[error("multiple vmx files ({}) found in directory: {dir}", display_paths(.files))]
    AmbiguousConfigFile { dir: PathBuf, files: Vec<PathBuf> },

    #[error("directory ({dir}) contains a .vmx directory ({path}), expected a file")]
    ConfigIsDirectory { dir: PathBuf, path: PathBuf },

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum LocateError {
    #[error("executable file not found: {name}")]
    NotFound { name: String },

    #[error("walking {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Error, Debug)]
pub enum HomeError {
    #[error("cannot find home directory")]
    NoHomeDirectory,

    #[error("resolving home directory: {0}")]
    Shell(#[from] io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing argument: {field} (flag: {flag:?} environment: {env:?})")]
    MissingArgument {
        field: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("invalid stemcell version {0:?}: must be of the form NUMBER.NUMBER")]
    InvalidVersion(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

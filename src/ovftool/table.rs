//! Platform knowledge about where ovftool gets installed

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[cfg(target_os = "macos")]
const FUSION_OVFTOOL: &str = "/Applications/VMware Fusion.app/Contents/Library/VMware OVF Tool/ovftool";
#[cfg(target_os = "macos")]
const FUSION_APP: &str = "/Applications/VMware Fusion.app";

/// Executable name of the OVF conversion tool on this platform
pub fn ovftool_name() -> &'static str {
    if cfg!(windows) {
        "ovftool.exe"
    } else {
        "ovftool"
    }
}

/// Candidate files to probe and directories to walk, in priority order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPathTable {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

impl SearchPathTable {
    /// The table for this platform, built on first use.
    pub fn global() -> &'static SearchPathTable {
        static TABLE: OnceLock<SearchPathTable> = OnceLock::new();
        TABLE.get_or_init(Self::for_platform)
    }

    #[cfg(target_os = "macos")]
    pub fn for_platform() -> Self {
        let home = crate::utils::home::home_directory().ok();
        Self::fusion(home.as_deref())
    }

    #[cfg(windows)]
    pub fn for_platform() -> Self {
        let dirs = super::registry::install_paths(super::registry::query_workstation_value);
        Self::workstation(dirs)
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    pub fn for_platform() -> Self {
        Self::default()
    }

    /// VMware Fusion bundle paths, repeated under `home` when known.
    #[cfg(target_os = "macos")]
    pub fn fusion(home: Option<&Path>) -> Self {
        let mut files = vec![PathBuf::from(FUSION_OVFTOOL)];
        let mut dirs = vec![PathBuf::from(FUSION_APP)];
        if let Some(home) = home {
            files.push(crate::utils::paths::rebase_under(home, Path::new(FUSION_OVFTOOL)));
            dirs.push(crate::utils::paths::rebase_under(home, Path::new(FUSION_APP)));
        }
        Self { files, dirs }
    }

    /// VMware Workstation install directories: `<dir>/ovftool/<name>` is
    /// probed first, then each directory is walked.
    pub fn workstation(install_dirs: Vec<PathBuf>) -> Self {
        let files = install_dirs
            .iter()
            .map(|d| d.join("ovftool").join(ovftool_name()))
            .collect();
        Self {
            files,
            dirs: install_dirs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    pub fn contains_dir(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }
}

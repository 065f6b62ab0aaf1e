//! Stemcell VMX - VMX directory and ovftool discovery
//!
//! Finds versioned VMX directories ("vmx-1", "vmx-2", ...) and the VMware
//! OVF Tool for a stemcell image build.

pub mod cli;
pub mod config;
pub mod error;
pub mod ovftool;
pub mod utils;
pub mod vmx;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::Settings;
pub use error::{ConfigError, EntryError, HomeError, LocateError, ScanError};
pub use ovftool::{find_ovftool, locate_executable, Locator, SearchPathTable};
pub use vmx::{read_vmx_dir, read_vmx_dir_with, VmxEntry};

/// Library error type
pub type Result<T> = anyhow::Result<T>;

/// Scan `path` for versioned VMX directories named after `format`.
pub fn scan_config_directory(
    path: impl AsRef<std::path::Path>,
    format: &str,
) -> std::result::Result<Vec<VmxEntry>, ScanError> {
    read_vmx_dir(path, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_scan_config_directory() {
        let temp = TempDir::new().unwrap();
        for v in [2, 1, 10] {
            let dir = temp.path().join(format!("vmx-{v}"));
            fs::create_dir(&dir).unwrap();
            File::create(dir.join("stemcell.vmx")).unwrap();
        }

        let entries = scan_config_directory(temp.path(), "vmx-%d").unwrap();
        assert!(entries.windows(2).all(|w| w[0].version <= w[1].version));
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_vmx_entry_serialization() {
        let entry = VmxEntry {
            dirname: "/vmx/vmx-1".into(),
            path: "/vmx/vmx-1/a.vmx".into(),
            name: "a.vmx".to_string(),
            version: 1,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"version\":1"));

        let parsed: VmxEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_locate_missing_executable() {
        let err = locate_executable("stemcell-vmx-no-such-tool-12345").unwrap_err();
        assert!(err.to_string().contains("stemcell-vmx-no-such-tool-12345"));
    }
}

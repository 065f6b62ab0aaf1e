//! VMware Workstation install paths from the Windows registry

use std::path::PathBuf;

/// Key under HKEY_LOCAL_MACHINE describing the Workstation install
pub const WORKSTATION_KEY: &str = r"SOFTWARE\Wow6432Node\VMware, Inc.\VMware Workstation";

/// Values holding install directories, in preference order
pub const INSTALL_VALUES: [&str; 2] = ["InstallPath64", "InstallPath"];

/// Install directories returned by `query` for [`INSTALL_VALUES`], first
/// occurrence only.
pub fn install_paths<F>(mut query: F) -> Vec<PathBuf>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut paths: Vec<PathBuf> = Vec::new();
    for value in INSTALL_VALUES {
        if let Some(p) = query(value).filter(|s| !s.is_empty()).map(PathBuf::from) {
            if !paths.contains(&p) {
                paths.push(p);
            }
        }
    }
    paths
}

/// Read a string value under HKLM\`subkey`; a missing key or value is None.
#[cfg(windows)]
pub fn query_value(subkey: &str, value: &str) -> Option<String> {
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
    use winreg::RegKey;

    let key = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey_with_flags(subkey, KEY_READ)
        .ok()?;
    key.get_value::<String, _>(value).ok()
}

/// Read a single string value under [`WORKSTATION_KEY`].
#[cfg(windows)]
pub fn query_workstation_value(value: &str) -> Option<String> {
    query_value(WORKSTATION_KEY, value)
}

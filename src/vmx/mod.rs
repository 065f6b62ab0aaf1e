//! Versioned VMX directory discovery

pub mod format;
pub mod scanner;

pub use format::VersionFormat;
pub use scanner::{find_vmx_file, read_vmx_dir, read_vmx_dir_with, VmxEntry, VMX_EXTENSION};

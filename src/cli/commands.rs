//! CLI command definitions

use crate::config::SettingsArgs;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Stemcell VMX tool (Rust)
#[derive(Parser, Debug)]
#[command(
    name = "stemcell-vmx",
    about = "Find versioned VMX directories and ovftool for stemcell builds"
)]
pub struct Cli {
    /// Print debugging information
    #[arg(long, global = true, env = "STEMCELL_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List versioned VMX directories as JSON, lowest version first
    Scan {
        /// Directory containing VMX directories
        #[arg(long = "vmx", env = "STEMCELL_VMX_DIR")]
        dir: PathBuf,

        /// Directory name format with one %d for the version
        #[arg(long, env = "STEMCELL_VMX_FORMAT", default_value = "vmx-%d")]
        format: String,
    },

    /// Print the path of ovftool (or another executable)
    Locate {
        /// Executable name (defaults to ovftool for this platform)
        name: Option<String>,
    },

    /// Validate settings and print the resolved build inputs as JSON
    Plan {
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate man page
    ManPage,
}

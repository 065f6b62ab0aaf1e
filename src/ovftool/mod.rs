//! Locating the OVF conversion tool (ovftool)
//!
//! Lookup tries, in order: the process PATH, well-known install files for
//! this platform, then a walk of well-known install directories. The first
//! hit wins.

pub mod registry;
pub mod table;
pub mod walk;

pub use table::{ovftool_name, SearchPathTable};
pub use walk::{file_name_matches, find_executable, walk, WalkControl};

use crate::error::LocateError;
use crate::utils::paths::exists;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Everything a search strategy may consult
#[derive(Debug, Clone)]
pub struct SearchContext {
    pub table: SearchPathTable,
    /// Value used in place of the PATH environment variable
    pub path_var: Option<OsString>,
    pub cwd: PathBuf,
}

impl SearchContext {
    /// Context for this process: its PATH, working directory and the
    /// platform table.
    pub fn from_env() -> Self {
        Self {
            table: SearchPathTable::global().clone(),
            path_var: env::var_os("PATH"),
            cwd: env::current_dir().unwrap_or_default(),
        }
    }
}

pub type Strategy = fn(&str, &SearchContext) -> Option<PathBuf>;

/// Resolve `name` against the PATH of the context.
pub fn search_path(name: &str, ctx: &SearchContext) -> Option<PathBuf> {
    which::which_in(name, ctx.path_var.as_ref(), &ctx.cwd).ok()
}

/// Probe each well-known file named `name` (ignoring case); it must exist
/// and resolve as an executable.
pub fn search_known_files(name: &str, ctx: &SearchContext) -> Option<PathBuf> {
    ctx.table
        .files
        .iter()
        .filter(|file| file_name_matches(file, name))
        .filter(|file| exists(file))
        .find_map(|file| which::which_in(file, ctx.path_var.as_ref(), &ctx.cwd).ok())
}

/// Walk each existing well-known directory, stopping at the first match.
pub fn search_known_dirs(name: &str, ctx: &SearchContext) -> Option<PathBuf> {
    ctx.table
        .dirs
        .iter()
        .filter(|dir| exists(dir))
        .find_map(|dir| find_executable(dir, name).ok())
}

/// Named strategies, highest priority first
pub const DEFAULT_STRATEGIES: [(&str, Strategy); 3] = [
    ("path", search_path),
    ("known-files", search_known_files),
    ("known-dirs", search_known_dirs),
];

/// Executable lookup over an ordered list of strategies
pub struct Locator {
    ctx: SearchContext,
    strategies: Vec<(&'static str, Strategy)>,
}

impl Locator {
    pub fn new(ctx: SearchContext) -> Self {
        Self {
            ctx,
            strategies: DEFAULT_STRATEGIES.to_vec(),
        }
    }

    pub fn with_strategies(ctx: SearchContext, strategies: Vec<(&'static str, Strategy)>) -> Self {
        Self { ctx, strategies }
    }

    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Find `name`, returning the path and the strategy that found it.
    pub fn locate_with_source(&self, name: &str) -> Result<(PathBuf, &'static str), LocateError> {
        self.strategies
            .iter()
            .find_map(|(label, strategy)| strategy(name, &self.ctx).map(|p| (p, *label)))
            .ok_or_else(|| LocateError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn locate(&self, name: &str) -> Result<PathBuf, LocateError> {
        self.locate_with_source(name).map(|(path, _)| path)
    }
}

impl Default for Locator {
    fn default() -> Self {
        Self::new(SearchContext::from_env())
    }
}

/// Find the executable `name` using this process's environment.
pub fn locate_executable(name: &str) -> Result<PathBuf, LocateError> {
    Locator::default().locate(name)
}

/// Find ovftool using this process's environment.
pub fn find_ovftool() -> Result<PathBuf, LocateError> {
    locate_executable(ovftool_name())
}

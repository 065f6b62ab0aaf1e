//! Home directory resolution

use crate::error::HomeError;
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
#[cfg(unix)]
use std::process::Command;

#[cfg(windows)]
const HOME_VAR: &str = "USERPROFILE";
#[cfg(not(windows))]
const HOME_VAR: &str = "HOME";

/// Get the user's home directory, asking the platform when the environment
/// does not say.
pub fn home_directory() -> Result<PathBuf, HomeError> {
    resolve_home(env::var_os(HOME_VAR), platform_home)
}

/// Prefer `env_value`; otherwise use `fallback`, whose output is trimmed.
pub fn resolve_home<F>(env_value: Option<OsString>, fallback: F) -> Result<PathBuf, HomeError>
where
    F: FnOnce() -> io::Result<String>,
{
    if let Some(home) = env_value.filter(|s| !s.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let out = fallback()?;
    let home = out.trim();
    if home.is_empty() {
        return Err(HomeError::NoHomeDirectory);
    }
    Ok(PathBuf::from(home))
}

#[cfg(unix)]
fn platform_home() -> io::Result<String> {
    let output = Command::new("sh").args(["-c", "cd && pwd"]).output()?;
    if !output.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sh exited with {}", output.status),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(not(unix))]
fn platform_home() -> io::Result<String> {
    Ok(dirs::home_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_value_wins() {
        let home = resolve_home(Some("/home/builder".into()), || {
            panic!("fallback must not run")
        })
        .unwrap();
        assert_eq!(home, PathBuf::from("/home/builder"));
    }

    #[test]
    fn test_fallback_is_trimmed() {
        let home = resolve_home(Some(OsString::new()), || Ok("  /home/x\n".into())).unwrap();
        assert_eq!(home, PathBuf::from("/home/x"));
    }

    #[test]
    fn test_no_home_directory() {
        let err = resolve_home(None, || Ok(" \n".into())).unwrap_err();
        assert!(matches!(err, HomeError::NoHomeDirectory));
    }

    #[test]
    fn test_fallback_error() {
        let err = resolve_home(None, || Err(io::Error::new(io::ErrorKind::NotFound, "no sh")))
            .unwrap_err();
        assert!(matches!(err, HomeError::Shell(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_platform_home() {
        // `cd` with HOME set goes there, so this only checks the shell round trip
        let out = platform_home().unwrap();
        assert!(out.trim().starts_with('/'));
    }
}

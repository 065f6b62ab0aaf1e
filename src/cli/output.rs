//! JSON output and top-level error reporting

use crate::Result;
use serde::Serialize;
use std::fmt::Display;
use std::io::Write;
use std::panic::Location;
use std::path::Path;

/// Pretty-print `value` as JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Error line annotated with the caller's file and line
#[track_caller]
pub fn error_line(err: &dyn Display) -> String {
    let loc = Location::caller();
    let file = Path::new(loc.file())
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| loc.file().to_string());
    format!("Error ({}:{}): {}", file, loc.line(), err)
}

/// Print an annotated error (with its causes) to stderr
#[track_caller]
pub fn report(err: &anyhow::Error) {
    let msg = format!("{err:#}");
    eprintln!("{}", error_line(&msg));
}

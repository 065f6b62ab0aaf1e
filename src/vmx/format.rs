//! Versioned directory name templates ("vmx-%d")

use crate::error::{EntryError, ScanError};
use glob::Pattern;

const PLACEHOLDER: &str = "%d";

/// A directory name template holding exactly one `%d` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFormat {
    template: String,
    prefix: String,
    suffix: String,
}

impl VersionFormat {
    pub fn parse(template: &str) -> Result<Self, ScanError> {
        if template.matches(PLACEHOLDER).count() != 1 {
            return Err(ScanError::InvalidFormat(template.to_string()));
        }
        let (prefix, suffix) = template
            .split_once(PLACEHOLDER)
            .ok_or_else(|| ScanError::InvalidFormat(template.to_string()))?;
        Ok(Self {
            template: template.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Glob pattern matching candidate names: "vmx-%d" becomes "vmx-*".
    pub fn glob_pattern(&self) -> Result<Pattern, ScanError> {
        let pattern = format!(
            "{}*{}",
            Pattern::escape(&self.prefix),
            Pattern::escape(&self.suffix)
        );
        Pattern::new(&pattern).map_err(|_| ScanError::InvalidFormat(self.template.clone()))
    }

    /// Extract the version embedded in `name`, reading it the way a scanf
    /// template would: prefix, optional `+`, digits, then the suffix.
    /// Input left after the suffix is ignored ("vmx-1-old" reads as 1).
    pub fn scan(&self, name: &str) -> Result<u64, EntryError> {
        let malformed = || EntryError::MalformedEntry {
            name: name.to_string(),
            format: self.template.clone(),
        };
        let rest = name.strip_prefix(&self.prefix).ok_or_else(malformed)?;
        let rest = rest.strip_prefix('+').unwrap_or(rest);
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, tail) = rest.split_at(end);
        if digits.is_empty() || !tail.starts_with(self.suffix.as_str()) {
            return Err(malformed());
        }
        digits.parse().map_err(|_| malformed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_count() {
        assert!(VersionFormat::parse("vmx-%d").is_ok());
        assert!(VersionFormat::parse("%d").is_ok());
        assert!(matches!(
            VersionFormat::parse("vmx"),
            Err(ScanError::InvalidFormat(_))
        ));
        assert!(matches!(
            VersionFormat::parse("vmx-%d-%d"),
            Err(ScanError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_glob_pattern() {
        let f = VersionFormat::parse("vmx-%d").unwrap();
        let p = f.glob_pattern().unwrap();
        assert_eq!(p.as_str(), "vmx-*");
        assert!(p.matches("vmx-12"));
        assert!(p.matches("vmx-abc"));
        assert!(!p.matches("other-1"));

        // literal brackets stay literal
        let f = VersionFormat::parse("[vm]-%d").unwrap();
        let p = f.glob_pattern().unwrap();
        assert!(p.matches("[vm]-3"));
        assert!(!p.matches("v-3"));
    }

    #[test]
    fn test_scan() {
        let f = VersionFormat::parse("vmx-%d").unwrap();
        assert_eq!(f.scan("vmx-0").unwrap(), 0);
        assert_eq!(f.scan("vmx-10").unwrap(), 10);
        assert!(f.scan("vmx-").is_err());
        assert!(f.scan("vmx-abc").is_err());
        assert!(f.scan("vmx--1").is_err());
        assert!(f.scan("vmx-+").is_err());
        assert!(f.scan("vmx-99999999999999999999999").is_err());

        let f = VersionFormat::parse("build-%d.vm").unwrap();
        assert_eq!(f.scan("build-7.vm").unwrap(), 7);
        assert!(f.scan("build-7").is_err());
        assert!(f.scan("build-7.vx").is_err());
    }

    #[test]
    fn test_scan_ignores_trailing_input() {
        let f = VersionFormat::parse("vmx-%d").unwrap();
        assert_eq!(f.scan("vmx-1-old").unwrap(), 1);
        assert_eq!(f.scan("vmx-12abc").unwrap(), 12);
        assert_eq!(f.scan("vmx-+3").unwrap(), 3);

        let f = VersionFormat::parse("build-%d.vm").unwrap();
        assert_eq!(f.scan("build-7.vm.bak").unwrap(), 7);
    }
}

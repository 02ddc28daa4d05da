//! Parsers for system-level listings: `show status` and `show switches`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:Software[ \t]+)?Version[ ]?(.*?)[ \t\r]*$").expect("version pattern")
});

static MAJOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").expect("major pattern"));

static AVAILABLE_SWITCHES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)available\s+switches:(.*)").expect("available switches pattern")
});

/// Firmware version reported by `show status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoftwareVersion {
    /// Version string as printed, e.g. `02.05.01.15`.
    pub raw: String,
    /// First number of the version string.
    pub major: u32,
}

impl fmt::Display for SoftwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Extract the software version from `show status` output.
///
/// The field is always present in a successful response, so its absence
/// is an error.
pub fn parse_software_version(text: &str) -> Result<SoftwareVersion, ParseError> {
    let raw = VERSION
        .captures(text)
        .map(|caps| caps[1].trim_start_matches([':', ' ', '\t']).to_string())
        .ok_or_else(|| ParseError::MissingField {
            field: "Version".to_string(),
        })?;

    let major = MAJOR
        .captures(&raw)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .ok_or_else(|| ParseError::InvalidValue {
            field: "Version".to_string(),
            value: raw.clone(),
        })?;

    Ok(SoftwareVersion { raw, major })
}

/// Extract switch names listed after `Available switches:`.
pub fn parse_available_switches(text: &str) -> Result<Vec<String>, ParseError> {
    let caps = AVAILABLE_SWITCHES
        .captures(text)
        .ok_or_else(|| ParseError::MissingSection {
            section: "Available switches".to_string(),
        })?;

    Ok(caps[1]
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_version() {
        let text = "System status\nVersion 02.05.01.15\nUptime 12 days\n";
        let version = parse_software_version(text).unwrap();
        assert_eq!(version.raw, "02.05.01.15");
        assert_eq!(version.major, 2);
    }

    #[test]
    fn test_modern_version() {
        let version = parse_software_version("Version3.0.1 build 7").unwrap();
        assert_eq!(version.raw, "3.0.1 build 7");
        assert_eq!(version.major, 3);
    }

    #[test]
    fn test_version_line_must_start_with_version() {
        let text = "BIOS Version 1.2
Software Version 3.0.1
";
        let version = parse_software_version(text).unwrap();
        assert_eq!(version.raw, "3.0.1");
        assert_eq!(version.major, 3);
    }

    #[test]
    fn test_version_missing() {
        let err = parse_software_version("System status\nUptime 12 days\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { .. }));
    }

    #[test]
    fn test_version_without_number() {
        let err = parse_software_version("Version unknown\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
    }

    #[test]
    fn test_available_switches() {
        let text = "Available switches:\n  OS-192\n  OS-96\n\n";
        let switches = parse_available_switches(text).unwrap();
        assert_eq!(switches, vec!["OS-192", "OS-96"]);
    }

    #[test]
    fn test_available_switches_case_insensitive_marker() {
        let switches = parse_available_switches("AVAILABLE SWITCHES: lab-1\n").unwrap();
        assert_eq!(switches, vec!["lab-1"]);
    }

    #[test]
    fn test_available_switches_missing() {
        assert!(parse_available_switches("No switch configured\n").is_err());
    }
}

//! Device error messages.
//!
//! The switch reports failures as free text after a command. Each
//! [`ErrorMap`] is an ordered list of rules; the first rule matching the
//! output decides the message reported to the caller. Specific maps are
//! built by putting an overlay in front of the generic rules.

use std::sync::LazyLock;

use regex::Regex;

/// One recognizable error in command output.
#[derive(Debug, Clone)]
pub struct ErrorRule {
    pattern: Regex,
    message: &'static str,
    /// The match is ignored when directly preceded by one of these.
    not_preceded_by: &'static [&'static str],
}

impl ErrorRule {
    fn new(pattern: &str, message: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("error rule pattern"),
            message,
            not_preceded_by: &[],
        }
    }

    fn not_preceded_by(mut self, prefixes: &'static [&'static str]) -> Self {
        self.not_preceded_by = prefixes;
        self
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// Whether `output` contains this error.
    pub fn matches(&self, output: &str) -> bool {
        self.pattern.find_iter(output).any(|m| {
            let before = &output[..m.start()];
            !self.not_preceded_by.iter().any(|p| before.ends_with(p))
        })
    }
}

/// Ordered error rules for one command.
#[derive(Debug, Clone, Default)]
pub struct ErrorMap {
    rules: Vec<ErrorRule>,
}

impl ErrorMap {
    /// Rules of `overlay` first, then those of `base`.
    fn overlay(overlay: Vec<ErrorRule>, base: &ErrorMap) -> Self {
        let mut rules = overlay;
        rules.extend(base.rules.iter().cloned());
        Self { rules }
    }

    /// Message of the first rule matching `output`.
    pub fn check(&self, output: &str) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(output))
            .map(ErrorRule::message)
    }

    pub fn rules(&self) -> &[ErrorRule] {
        &self.rules
    }
}

/// Which error map a command is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSet {
    Generic,
    Logon,
    Mapping,
    DisconnectSimplex,
}

impl ErrorSet {
    pub fn map(self) -> &'static ErrorMap {
        match self {
            ErrorSet::Generic => &GENERIC_ERRORS,
            ErrorSet::Logon => &LOGON_ERRORS,
            ErrorSet::Mapping => &MAPPING_ERRORS,
            ErrorSet::DisconnectSimplex => &DISCONNECT_SIMPLEX_ERRORS,
        }
    }
}

pub static GENERIC_ERRORS: LazyLock<ErrorMap> = LazyLock::new(|| ErrorMap {
    rules: vec![
        ErrorRule::new("License expired!", "License expired. Please renew the license."),
        ErrorRule::new("[Ii]nvalid", "Command is invalid"),
        ErrorRule::new(" error", "Failed to perform command").not_preceded_by(&["Read", "read"]),
        ErrorRule::new(r"[Ss]witch\s[Nn]ot\s[Ff]ound", "Switch name was not found"),
    ],
});

pub static LOGON_ERRORS: LazyLock<ErrorMap> = LazyLock::new(|| {
    ErrorMap::overlay(
        vec![ErrorRule::new(
            "[Aa]ccess [Dd]enied",
            "Invalid username/password for login",
        )],
        &GENERIC_ERRORS,
    )
});

pub static MAPPING_ERRORS: LazyLock<ErrorMap> = LazyLock::new(|| {
    ErrorMap::overlay(
        vec![
            ErrorRule::new("[Nn]ot [Ff]ound", "Subport was not found"),
            ErrorRule::new("[Nn]ot compatible", r"Ports\Subports not compatible"),
            ErrorRule::new(
                "[Ee]rror|ERROR",
                "Error during command execution. See logs for more details",
            ),
        ],
        &GENERIC_ERRORS,
    )
});

pub static DISCONNECT_SIMPLEX_ERRORS: LazyLock<ErrorMap> = LazyLock::new(|| {
    ErrorMap::overlay(
        vec![ErrorRule::new("[Nn]ot simplex", "Connection is not simplex")],
        &GENERIC_ERRORS,
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_errors() {
        assert_eq!(
            GENERIC_ERRORS.check("License expired!"),
            Some("License expired. Please renew the license.")
        );
        assert_eq!(GENERIC_ERRORS.check("Invalid command"), Some("Command is invalid"));
        assert_eq!(
            GENERIC_ERRORS.check("Switch not found"),
            Some("Switch name was not found")
        );
        assert_eq!(GENERIC_ERRORS.check("Switch OS-192 has been selected"), None);
    }

    #[test]
    fn test_read_error_is_not_a_failure() {
        assert_eq!(GENERIC_ERRORS.check("Port 01.01.01 read error count 0"), None);
        assert_eq!(GENERIC_ERRORS.check("Read error"), None);
        assert_eq!(
            GENERIC_ERRORS.check("Command error"),
            Some("Failed to perform command")
        );
        assert_eq!(
            GENERIC_ERRORS.check("read error, then a real error"),
            Some("Failed to perform command")
        );
    }

    #[test]
    fn test_overlay_takes_precedence() {
        assert_eq!(
            MAPPING_ERRORS.check("Switch not found"),
            Some("Subport was not found")
        );
        assert_eq!(
            MAPPING_ERRORS.check("ports not compatible"),
            Some(r"Ports\Subports not compatible")
        );
        assert_eq!(
            MAPPING_ERRORS.check("Invalid"),
            Some("Command is invalid")
        );
        assert_eq!(MAPPING_ERRORS.rules().len(), 3 + GENERIC_ERRORS.rules().len());
    }

    #[test]
    fn test_logon_errors() {
        assert_eq!(
            LOGON_ERRORS.check("Access denied"),
            Some("Invalid username/password for login")
        );
        assert_eq!(LOGON_ERRORS.check("Welcome admin"), None);
    }

    #[test]
    fn test_disconnect_simplex_errors() {
        assert_eq!(
            DISCONNECT_SIMPLEX_ERRORS.check("Connection is Not simplex"),
            Some("Connection is not simplex")
        );
        assert_eq!(ErrorSet::DisconnectSimplex.map().rules().len(), 5);
    }
}

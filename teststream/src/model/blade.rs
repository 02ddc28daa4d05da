//! Registered blade (PIM) models.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

static BLADE_MODELS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"^o[-_\s]blade$", "O-Blade"),
        (r"^s[-_\s]blade$", "S-Blade"),
        (r"^s[-_\s]blade[-_\s]pro$", "S-Blade-Pro"),
        (r"^s[-_\s]blade\s64$", "S-Blade 64"),
        (r"^t[-_\s]blade$", "T-Blade"),
        (r"^t100[-_\s]blade$", "T100-Blade"),
        (r"^t100l[-_\s]blade$", "T100L-Blade"),
        (r"^hs[-_\s]bank$", "Hs-Bank"),
    ]
    .into_iter()
    .map(|(pattern, name)| {
        let pattern = format!("(?i){}", pattern);
        (Regex::new(&pattern).expect("blade model pattern"), name)
    })
    .collect()
});

/// Resolve a raw blade type label to its registered model name.
///
/// Unknown labels are an error: the resource tree cannot be built with
/// blades of an unknown model.
pub fn associate_model(label: &str) -> Result<&'static str, ParseError> {
    let label = label.trim();
    BLADE_MODELS
        .iter()
        .find(|(pattern, _)| pattern.is_match(label))
        .map(|(_, name)| *name)
        .ok_or_else(|| ParseError::UnknownBladeModel {
            model: label.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_models() {
        assert_eq!(associate_model("O-Blade").unwrap(), "O-Blade");
        assert_eq!(associate_model("o_blade").unwrap(), "O-Blade");
        assert_eq!(associate_model("S-BLADE-PRO").unwrap(), "S-Blade-Pro");
        assert_eq!(associate_model("s-blade 64").unwrap(), "S-Blade 64");
        assert_eq!(associate_model("T100L-Blade").unwrap(), "T100L-Blade");
        assert_eq!(associate_model("HS Bank").unwrap(), "Hs-Bank");
    }

    #[test]
    fn test_unknown_model_is_error() {
        let err = associate_model("X-Blade").unwrap_err();
        assert!(matches!(err, ParseError::UnknownBladeModel { ref model } if model == "X-Blade"));
        assert!(associate_model("O-Blade-Extra").is_err());
    }
}

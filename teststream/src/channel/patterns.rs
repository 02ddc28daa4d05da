//! Prompt and banner patterns of the TestStream CLI.

use std::sync::LazyLock;

use regex::bytes::Regex;

/// Command prompt: a line ending in `=>`, e.g. `OS-192=> `.
pub static DEFAULT_PROMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\n]*=>\s*$").expect("static prompt pattern"));

/// Usage agreement shown after logon on some firmware.
pub static ACCEPT_DECLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)accept\s*/\s*decline").expect("static banner pattern"));

/// Either the prompt or the agreement banner, whichever arrives first.
pub static LOGIN_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[^\n]*=>\s*$)|(?i:accept\s*/\s*decline)").expect("static login pattern")
});

/// Answer sent to the agreement banner.
pub const ACCEPT_ANSWER: &str = "A";

/// Compile a prompt pattern string into a regex, anchoring it to the end.
pub fn compile_prompt_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    let pattern = if pattern.ends_with('$') {
        pattern.to_string()
    } else {
        format!("{}\\s*$", pattern)
    };

    Regex::new(&pattern)
}

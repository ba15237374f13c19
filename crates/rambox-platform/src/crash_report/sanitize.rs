use std::sync::OnceLock;

use regex::Regex;

/// Redaction rules applied in order: `(pattern, replacement)`.
fn rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            // Query strings of service URLs often carry session tokens
            (r"(https?://[^\s?#]+)\?[^\s#]*", "${1}?[REDACTED]"),
            (r"Bearer [a-zA-Z0-9._\-]+", "Bearer [REDACTED]"),
            (r"(?i)(cookie:\s*)[^\r\n]+", "${1}[REDACTED]"),
            (
                r"(?i)((?:password|passwd|token|secret|session|key)=)[^\s&]+",
                "${1}[REDACTED]",
            ),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("crash_report: static regex pattern must compile"),
                replacement,
            )
        })
        .collect()
    })
}

/// Redacts secrets that commonly appear in service URLs and HTTP headers.
pub fn sanitize_secrets(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in rules() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

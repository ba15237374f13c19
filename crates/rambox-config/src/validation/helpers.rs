//! Shared validation helpers used by all section validators.

use std::sync::OnceLock;

use regex::Regex;

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn http_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^https?://[^\s/?#]+[^\s]*$").expect("validation: static URL regex must compile")
    })
}

/// Push an error unless `value` is an absolute `http(s)` URL.
pub(crate) fn validate_http_url(errors: &mut Vec<String>, name: &str, value: &str) {
    if !http_url_pattern().is_match(value) {
        errors.push(format!("{name} = {value:?} is not an http(s) URL"));
    }
}

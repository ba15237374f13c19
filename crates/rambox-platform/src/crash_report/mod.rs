mod report;
mod sanitize;

pub use report::write_crash_report;
pub use sanitize::sanitize_secrets;

#[cfg(test)]
mod tests {
    use super::report::write_report_to;
    use super::*;

    #[test]
    fn sanitize_redacts_url_query() {
        let input = "failed loading https://mail.example.com/inbox?session=abc123&u=0 (404)";
        let result = sanitize_secrets(input);
        assert!(!result.contains("abc123"), "got: {result}");
        assert!(result.contains("https://mail.example.com/inbox?[REDACTED]"));
        assert!(result.ends_with("(404)"));
    }

    #[test]
    fn sanitize_redacts_bearer() {
        let input = "header: Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload.signature";
        let result = sanitize_secrets(input);
        assert!(!result.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(result.contains("Bearer [REDACTED]"));
    }

    #[test]
    fn sanitize_redacts_cookie_header() {
        let input = "Cookie: sid=deadbeef; theme=dark\nnext line";
        let result = sanitize_secrets(input);
        assert!(!result.contains("deadbeef"));
        assert!(result.contains("next line"));
    }

    #[test]
    fn sanitize_redacts_inline_password() {
        let result = sanitize_secrets("login password=hunter2 failed");
        assert_eq!(result, "login password=[REDACTED] failed");
    }

    #[test]
    fn sanitize_leaves_normal_text() {
        let input =
            "thread 'main' panicked at 'index out of bounds: the len is 3 but the index is 5'";
        assert_eq!(sanitize_secrets(input), input);
        assert_eq!(sanitize_secrets("https://web.whatsapp.com/"), "https://web.whatsapp.com/");
        assert_eq!(sanitize_secrets(""), "");
    }

    #[test]
    fn report_is_written_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_report_to(
            dir.path(),
            "boom at https://x.test/?token=zzz",
            Some("src/main.rs:1:1"),
            "frame 0",
        )
        .unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["location"], "src/main.rs:1:1");
        assert!(!json["panic_message"].as_str().unwrap().contains("zzz"));
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }
}

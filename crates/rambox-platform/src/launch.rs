//! Handing URLs and files over to the operating system.

use std::path::Path;

use rambox_common::PlatformError;
use tracing::info;

/// Schemes that are handed to the user's default browser or mail client.
const EXTERNAL_SCHEMES: &[&str] = &["http:", "https:", "mailto:"];

/// Whether `url` may be opened outside the app.
pub fn is_external_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    EXTERNAL_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
}

/// Open `url` with the system handler. Only http, https and mailto are allowed.
pub fn open_external(url: &str) -> Result<(), PlatformError> {
    if !is_external_url(url) {
        return Err(PlatformError::LaunchError(format!(
            "refusing to open non-web URL: {url}"
        )));
    }
    open::that_detached(url)
        .map_err(|e| PlatformError::LaunchError(format!("failed to open {url}: {e}")))?;
    info!(url = %url, "opened in external handler");
    Ok(())
}

/// Start a downloaded update package with the system handler.
///
/// Installers (`.dmg`, `.exe`, `.AppImage`) are opened the same way a user
/// double-clicking them would.
pub fn launch_package(path: &Path) -> Result<(), PlatformError> {
    if !path.is_file() {
        return Err(PlatformError::LaunchError(format!(
            "update package missing: {}",
            path.display()
        )));
    }
    open::that_detached(path).map_err(|e| {
        PlatformError::LaunchError(format!("failed to launch {}: {e}", path.display()))
    })?;
    info!(path = %path.display(), "update package launched");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_and_mail_urls_are_external() {
        assert!(is_external_url("https://example.com/a"));
        assert!(is_external_url("http://example.com"));
        assert!(is_external_url("mailto:someone@example.com"));
        assert!(is_external_url("HTTPS://EXAMPLE.COM"));
    }

    #[test]
    fn other_schemes_are_refused() {
        assert!(!is_external_url("file:///etc/passwd"));
        assert!(!is_external_url("javascript:alert(1)"));
        assert!(!is_external_url("rambox://localhost/chrome/index.html"));
        assert!(!is_external_url(""));
        assert!(open_external("file:///etc/passwd").is_err());
    }

    #[test]
    fn launching_missing_package_fails() {
        let err = launch_package(Path::new("/nonexistent/rambox-9.9.9.dmg")).unwrap_err();
        assert!(matches!(err, PlatformError::LaunchError(_)));
    }
}

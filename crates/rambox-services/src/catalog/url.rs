//! Service URL validation and custom-domain template resolution.

use rambox_common::ServiceError;

use super::{ServiceCatalogEntry, URL_PLACEHOLDER};

/// Check that `url` is an absolute `http(s)` URL with a host, and return it
/// trimmed.
pub fn validate_service_url(url: &str) -> Result<String, ServiceError> {
    let trimmed = url.trim();
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| ServiceError::Invalid(format!("invalid service url {trimmed:?}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ServiceError::Invalid(format!(
                "service url must be http or https, got {other}:"
            )))
        }
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ServiceError::Invalid(format!(
            "service url {trimmed:?} has no host"
        )));
    }
    Ok(trimmed.to_string())
}

/// Work out the URL for a new service from its catalog entry and what the
/// user typed.
///
/// - `https://___.slack.com/` with `acme` gives `https://acme.slack.com/`.
/// - A bare `___` template (the custom entry) takes the input as a full URL.
/// - A `custom_domain` entry without a placeholder lets a non-empty input
///   override the default URL.
/// - Anything else keeps the template.
pub fn resolve_service_url(
    entry: &ServiceCatalogEntry,
    input: Option<&str>,
) -> Result<String, ServiceError> {
    let input = input.map(str::trim).filter(|s| !s.is_empty());

    if entry.url == URL_PLACEHOLDER {
        let input = input.ok_or_else(|| {
            ServiceError::Invalid(format!("{} needs a URL", entry.name))
        })?;
        return validate_service_url(input);
    }

    if entry.url.contains(URL_PLACEHOLDER) {
        let input = input.ok_or_else(|| {
            ServiceError::Invalid(format!("{} needs a team or domain name", entry.name))
        })?;
        if input.contains(['/', ':', '?', '#', ' ']) {
            return Err(ServiceError::Invalid(format!(
                "{input:?} is not a valid domain name"
            )));
        }
        return validate_service_url(&entry.url.replacen(URL_PLACEHOLDER, input, 1));
    }

    match input {
        Some(custom) if entry.custom_domain => validate_service_url(custom),
        _ => Ok(entry.url.clone()),
    }
}

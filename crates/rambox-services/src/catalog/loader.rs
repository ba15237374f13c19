//! Fetches the catalog feed over HTTP.

use std::time::Duration;

use tracing::{info, warn};

use rambox_common::ServiceError;

use super::{ServiceCatalog, ServiceCatalogEntry};

/// Parse the catalog feed: a JSON array of entries.
pub fn parse_catalog(json: &str) -> Result<Vec<ServiceCatalogEntry>, ServiceError> {
    serde_json::from_str(json)
        .map_err(|e| ServiceError::Store(format!("failed to parse service catalog: {e}")))
}

/// Loads the catalog once per session.
pub struct CatalogLoader {
    url: String,
    timeout: Duration,
}

impl CatalogLoader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the catalog.
    ///
    /// Any network, HTTP-status or JSON failure yields an empty catalog
    /// (without the custom entry). There is no retry.
    pub async fn fetch(&self) -> ServiceCatalog {
        match self.try_fetch().await {
            Ok(entries) => {
                info!(count = entries.len(), "service catalog loaded");
                ServiceCatalog::new(entries).with_custom_entry()
            }
            Err(e) => {
                warn!(url = %self.url, error = %e, "failed to load service catalog");
                ServiceCatalog::default()
            }
        }
    }

    async fn try_fetch(&self) -> Result<Vec<ServiceCatalogEntry>, String> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| e.to_string())?;

        let response = client
            .get(&self.url)
            .header("User-Agent", concat!("rambox/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let body = response.text().await.map_err(|e| e.to_string())?;
        parse_catalog(&body).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceKind;

    const FEED: &str = r#"[
        {
            "id": "slack",
            "name": "Slack",
            "url": "https://___.slack.com/",
            "type": "messaging",
            "logo": "slack.png",
            "js_unread": "setInterval(check, 3000);"
        },
        {
            "id": "messenger",
            "name": "Messenger",
            "url": "https://www.messenger.com/",
            "type": "messaging",
            "titleBlink": true,
            "note": "Enable notifications in Options."
        },
        {
            "id": "hangouts",
            "name": "Hangouts",
            "url": "https://hangouts.google.com/",
            "type": "messaging",
            "manual_notifications": true,
            "userAgent": "Mozilla/5.0"
        },
        {
            "id": "mastodon",
            "name": "Mastodon",
            "url": "https://mastodon.social/auth/sign_in",
            "type": "messaging",
            "custom_domain": true,
            "allow_popups": true
        },
        {
            "id": "gmail",
            "name": "Gmail",
            "url": "https://mail.google.com/mail/",
            "type": "email"
        },
        {
            "id": "todoist",
            "name": "Todoist",
            "url": "https://todoist.com/app",
            "type": "tools"
        }
    ]"#;

    #[test]
    fn parses_feed_fields() {
        let entries = parse_catalog(FEED).unwrap();
        assert_eq!(entries.len(), 6);

        let slack = &entries[0];
        assert_eq!(slack.kind, ServiceKind::Messaging);
        assert_eq!(slack.logo, "slack.png");
        assert!(slack.needs_url_input());

        assert!(entries[1].title_blink);
        assert_eq!(entries[1].note, "Enable notifications in Options.");
        assert!(entries[2].manual_notifications);
        assert_eq!(entries[2].user_agent, "Mozilla/5.0");
        assert!(entries[3].custom_domain);
        assert!(entries[3].allow_popups);
        assert_eq!(entries[4].kind, ServiceKind::Email);
        assert_eq!(entries[5].kind, ServiceKind::Other);
    }

    #[test]
    fn optional_fields_default() {
        let entries =
            parse_catalog(r#"[{"id":"x","name":"X","url":"https://x.example/"}]"#).unwrap();
        let x = &entries[0];
        assert_eq!(x.kind, ServiceKind::Other);
        assert!(!x.title_blink && !x.manual_notifications && !x.allow_popups);
        assert!(x.js_unread.is_empty());
    }

    #[test]
    fn rejects_non_array_and_missing_required() {
        assert!(parse_catalog(r#"{"id":"x"}"#).is_err());
        assert!(parse_catalog(r#"[{"id":"x","name":"X"}]"#).is_err());
        assert!(parse_catalog("not json").is_err());
    }

    #[tokio::test]
    async fn unreachable_feed_yields_empty_catalog() {
        // Port 9 (discard) on loopback refuses connections immediately
        let loader = CatalogLoader::new("http://127.0.0.1:9/services.json", Duration::from_secs(2));
        let catalog = loader.fetch().await;
        assert!(catalog.is_empty());
        assert!(catalog.get("custom").is_none());
    }
}

use std::time::Duration;

use rambox_common::RamboxError;
use semver::Version;
use serde::Deserialize;

/// A release offered by the update server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateRelease {
    /// Version string, e.g. "0.2.0" or "v0.2.0".
    pub name: String,
    /// Download URL of the platform package.
    pub url: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
}

impl UpdateRelease {
    pub fn version(&self) -> Result<Version, RamboxError> {
        parse_version(&self.name)
    }
}

fn parse_version(raw: &str) -> Result<Version, RamboxError> {
    let trimmed = raw.trim().trim_start_matches('v');
    Version::parse(trimmed).map_err(|e| RamboxError::Update(format!("bad version {raw:?}: {e}")))
}

/// `{os}_{arch}`, e.g. `linux_x86_64`.
pub fn platform_key() -> String {
    format!("{}_{}", std::env::consts::OS, std::env::consts::ARCH)
}

pub fn update_url(endpoint: &str, current: &Version, channel: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    let mut url = format!("{base}/update/{}/{current}", platform_key());
    if channel != "stable" {
        url.push_str("?channel=");
        url.push_str(channel);
    }
    url
}

/// Interpret a response from the update server.
///
/// - 204: up to date
/// - 200: a release, offered only when strictly newer than `current`
/// - anything else: an error
pub fn parse_update_response(
    status: u16,
    body: &str,
    current: &Version,
) -> Result<Option<UpdateRelease>, RamboxError> {
    match status {
        204 => Ok(None),
        200 => {
            let release: UpdateRelease = serde_json::from_str(body)
                .map_err(|e| RamboxError::Update(format!("malformed release: {e}")))?;
            if release.version()? > *current {
                Ok(Some(release))
            } else {
                Ok(None)
            }
        }
        other => Err(RamboxError::Update(format!(
            "update server answered HTTP {other}"
        ))),
    }
}

/// Checks the update server for newer versions of this build.
pub struct UpdateChecker {
    endpoint: String,
    channel: String,
    current: Version,
    timeout: Duration,
}

impl UpdateChecker {
    pub fn new(endpoint: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            channel: channel.into(),
            // CARGO_PKG_VERSION is always valid semver
            current: Version::parse(env!("CARGO_PKG_VERSION")).unwrap_or(Version::new(0, 0, 0)),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn current_version(&self) -> &Version {
        &self.current
    }

    pub fn url(&self) -> String {
        update_url(&self.endpoint, &self.current, &self.channel)
    }

    /// Ask the server once. Failures are logged and reported as `None`.
    pub async fn check(&self) -> Option<UpdateRelease> {
        match self.try_check().await {
            Ok(Some(release)) => {
                tracing::info!(version = %release.name, "update available");
                Some(release)
            }
            Ok(None) => {
                tracing::debug!(current = %self.current, "no update available");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "update check failed");
                None
            }
        }
    }

    async fn try_check(&self) -> Result<Option<UpdateRelease>, RamboxError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("rambox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RamboxError::Network(e.to_string()))?;

        let response = client
            .get(self.url())
            .send()
            .await
            .map_err(|e| RamboxError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RamboxError::Network(e.to_string()))?;

        parse_update_response(status, &body, &self.current)
    }
}

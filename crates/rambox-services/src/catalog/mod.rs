//! Service catalog: the remote list of service templates offered by the
//! add-service picker.

pub mod loader;
pub mod url;

pub use loader::{parse_catalog, CatalogLoader};

use serde::{Deserialize, Serialize};

use crate::model::ServiceKind;

/// Catalog id of the synthetic custom-service entry.
pub const CUSTOM_ENTRY_ID: &str = "custom";

/// Placeholder in a catalog url that the user's input replaces.
pub const URL_PLACEHOLDER: &str = "___";

/// One service template from the catalog feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalogEntry {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ServiceKind,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub js_unread: String,
    #[serde(rename = "titleBlink", default)]
    pub title_blink: bool,
    #[serde(default)]
    pub manual_notifications: bool,
    #[serde(default)]
    pub allow_popups: bool,
    #[serde(default)]
    pub custom_domain: bool,
    #[serde(rename = "userAgent", default)]
    pub user_agent: String,
    #[serde(default)]
    pub note: String,
}

impl ServiceCatalogEntry {
    /// The synthetic entry for a user-supplied URL.
    pub fn custom() -> Self {
        Self {
            id: CUSTOM_ENTRY_ID.to_string(),
            name: "Custom Service".to_string(),
            url: URL_PLACEHOLDER.to_string(),
            description: "Add any web page as a service.".to_string(),
            kind: ServiceKind::Other,
            logo: String::new(),
            js_unread: String::new(),
            title_blink: false,
            manual_notifications: false,
            allow_popups: false,
            custom_domain: true,
            user_agent: String::new(),
            note: String::new(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id == CUSTOM_ENTRY_ID
    }

    /// Does adding this service need a URL or subdomain from the user?
    pub fn needs_url_input(&self) -> bool {
        self.url.contains(URL_PLACEHOLDER)
    }

    /// Absolute logo URL. Logos that are already absolute are returned as-is.
    pub fn logo_url(&self, icon_base_url: &str) -> String {
        if self.logo.is_empty() || self.logo.contains("://") {
            return self.logo.clone();
        }
        if icon_base_url.ends_with('/') {
            format!("{icon_base_url}{}", self.logo)
        } else {
            format!("{icon_base_url}/{}", self.logo)
        }
    }
}

/// The loaded catalog, sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceCatalog {
    entries: Vec<ServiceCatalogEntry>,
}

impl ServiceCatalog {
    pub fn new(mut entries: Vec<ServiceCatalogEntry>) -> Self {
        entries.sort_by_key(|e| e.name.to_lowercase());
        Self { entries }
    }

    /// Append the custom-service entry, once.
    pub fn with_custom_entry(mut self) -> Self {
        if !self.entries.iter().any(ServiceCatalogEntry::is_custom) {
            self.entries.push(ServiceCatalogEntry::custom());
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&ServiceCatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring match on the name. A blank query matches all.
    pub fn search(&self, query: &str) -> Vec<&ServiceCatalogEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn entries(&self) -> &[ServiceCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

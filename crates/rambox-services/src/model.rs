//! The persisted service record and the types used to create and edit it.

use serde::{Deserialize, Serialize};

use rambox_common::ServiceId;

/// Zoom factor bounds and step for a service web view.
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Which side of the spacer a tab sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Broad category of a service, used to word notifications.
///
/// Catalog feeds use free-form `type` strings; anything that is not
/// `messaging` or `email` is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ServiceKind {
    Messaging,
    Email,
    #[default]
    Other,
}

impl ServiceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKind::Messaging => "messaging",
            ServiceKind::Email => "email",
            ServiceKind::Other => "other",
        }
    }
}

impl From<&str> for ServiceKind {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "messaging" => ServiceKind::Messaging,
            "email" => ServiceKind::Email,
            _ => ServiceKind::Other,
        }
    }
}

impl From<String> for ServiceKind {
    fn from(s: String) -> Self {
        ServiceKind::from(s.as_str())
    }
}

impl From<ServiceKind> for String {
    fn from(kind: ServiceKind) -> Self {
        kind.as_str().to_string()
    }
}

fn default_true() -> bool {
    true
}

fn default_zoom() -> f64 {
    1.0
}

/// A configured service, shown as one tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    /// Catalog entry id this service was created from, or `custom`.
    #[serde(rename = "type")]
    pub service_type: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub kind: ServiceKind,
    #[serde(default)]
    pub logo: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub show_name_in_tab: bool,
    #[serde(default = "default_true")]
    pub display_tab_unread_counter: bool,
    #[serde(default = "default_true")]
    pub include_in_global_unread_counter: bool,
    /// Extra badge-detection script appended after the catalog's.
    #[serde(default)]
    pub js_unread: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

impl Service {
    pub fn is_custom(&self) -> bool {
        self.service_type == "custom"
    }

    /// Label shown on the tab.
    pub fn tab_title(&self) -> &str {
        if self.show_name_in_tab {
            &self.name
        } else {
            ""
        }
    }
}

/// Everything needed to create a service; the registry assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub service_type: String,
    pub name: String,
    pub url: String,
    pub align: Align,
    pub notifications: bool,
    pub muted: bool,
    pub kind: ServiceKind,
    pub logo: String,
    pub js_unread: String,
    pub user_agent: Option<String>,
}

impl NewService {
    pub fn new(
        service_type: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            name: name.into(),
            url: url.into(),
            align: Align::Left,
            notifications: true,
            muted: false,
            kind: ServiceKind::Other,
            logo: String::new(),
            js_unread: String::new(),
            user_agent: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn kind(mut self, kind: ServiceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn notifications(mut self, notifications: bool) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = logo.into();
        self
    }

    pub(crate) fn into_service(self, id: ServiceId) -> Service {
        Service {
            id,
            service_type: self.service_type,
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            align: self.align,
            notifications: self.notifications,
            muted: self.muted,
            kind: self.kind,
            logo: self.logo,
            enabled: true,
            show_name_in_tab: true,
            display_tab_unread_counter: true,
            include_in_global_unread_counter: true,
            js_unread: self.js_unread,
            user_agent: self.user_agent,
            zoom: default_zoom(),
        }
    }
}

/// A partial edit from the service settings dialog. `None` leaves a field alone.
/// Enabling and disabling goes through `set_enabled`, since it also creates
/// or drops the web view.
///
/// For `user_agent`, an empty string clears the override.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub align: Option<Align>,
    pub notifications: Option<bool>,
    pub muted: Option<bool>,
    pub show_name_in_tab: Option<bool>,
    pub display_tab_unread_counter: Option<bool>,
    pub include_in_global_unread_counter: Option<bool>,
    pub js_unread: Option<String>,
    pub user_agent: Option<String>,
}

/// Zoom controls for a service web view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAction {
    In,
    Out,
    Reset,
}

impl ZoomAction {
    /// Apply to a zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn apply(self, current: f64) -> f64 {
        let next = match self {
            ZoomAction::In => current + ZOOM_STEP,
            ZoomAction::Out => current - ZOOM_STEP,
            ZoomAction::Reset => 1.0,
        };
        // Keep one decimal so repeated steps don't drift
        ((next * 10.0).round() / 10.0).clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

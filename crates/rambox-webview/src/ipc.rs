//! IPC protocol between Rust and the web views.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: JavaScript calls `window.rambox.ipc.send(kind, payload)`,
//!   which posts `{kind, payload}` through `window.ipc.postMessage` to the
//!   `ipc_handler` registered on the WebView.
//! - **Rust -> JS**: Rust calls `webview.evaluate_script(...)` with a
//!   `window.rambox.ipc._dispatch(kind, payload)` call.
//!
//! Service views and the chrome view speak different message sets. Each
//! role only accepts its own kinds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use rambox_common::ServiceId;
use rambox_services::{Align, Service, ServicePatch, TabStrip, UnreadCount, ZoomAction};

/// A raw IPC message from JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / command name.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    #[serde(default)]
    pub payload: Value,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from JS postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }

    /// Deserialize into a typed enum tagged by `kind` with `payload` content.
    fn decode<T: for<'de> Deserialize<'de>>(&self) -> Result<T, IpcError> {
        let mut tagged = json!({ "kind": self.kind });
        if !self.payload.is_null() {
            tagged["payload"] = self.payload.clone();
        }
        serde_json::from_value(tagged).map_err(|e| IpcError::Malformed {
            kind: self.kind.clone(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("IPC body is not a valid message: {0}")]
    InvalidJson(String),

    #[error("IPC kind {kind:?} is not allowed for {role} views")]
    NotAllowed { role: &'static str, kind: String },

    #[error("malformed {kind} payload: {reason}")]
    Malformed { kind: String, reason: String },
}

// =============================================================================
// ROLES
// =============================================================================

/// Which kind of view sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcRole {
    /// The tab strip / dialogs view owned by the host.
    Chrome,
    /// A third-party service page.
    Service,
}

/// Kinds a service page may send.
pub const SERVICE_IPC_KINDS: &[&str] = &[
    "set_unread_count",
    "clear_unread_count",
    "show_window_and_activate_tab",
    "notification",
];

/// Kinds the chrome view may send.
pub const CHROME_IPC_KINDS: &[&str] = &[
    "chrome_ready",
    "activate_tab",
    "add_service",
    "remove_service",
    "remove_all_services",
    "move_service",
    "update_service",
    "set_enabled",
    "reload_service",
    "zoom",
    "toggle_dont_disturb",
    "set_overlay",
    "install_update",
    "dismiss_update",
    "toggle_devtools",
    "go_back",
    "go_forward",
    "find_in_page",
];

impl IpcRole {
    pub fn for_view(view_id: u32) -> Self {
        if view_id == crate::manager::CHROME_VIEW_ID {
            IpcRole::Chrome
        } else {
            IpcRole::Service
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IpcRole::Chrome => "chrome",
            IpcRole::Service => "service",
        }
    }

    pub fn allowed_kinds(self) -> &'static [&'static str] {
        match self {
            IpcRole::Chrome => CHROME_IPC_KINDS,
            IpcRole::Service => SERVICE_IPC_KINDS,
        }
    }

    pub fn is_kind_allowed(self, kind: &str) -> bool {
        self.allowed_kinds().contains(&kind)
    }

    /// Parse a raw body and check its kind against this role.
    pub fn parse(self, body: &str) -> Result<IpcMessage, IpcError> {
        let msg = IpcMessage::from_json(body)
            .ok_or_else(|| IpcError::InvalidJson(format!("{} bytes", body.len())))?;
        if !self.is_kind_allowed(&msg.kind) {
            return Err(IpcError::NotAllowed {
                role: self.name(),
                kind: msg.kind,
            });
        }
        Ok(msg)
    }
}

// =============================================================================
// SERVICE -> HOST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnreadPayload {
    pub count: UnreadCount,
}

/// A page notification the web view could not show itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageNotification {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub silent: bool,
}

/// Messages from a service page's injected bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ServiceMessage {
    SetUnreadCount(UnreadPayload),
    ClearUnreadCount,
    /// A relayed notification was clicked.
    ShowWindowAndActivateTab,
    /// Raise this through the OS on the page's behalf.
    Notification(PageNotification),
}

impl ServiceMessage {
    pub fn from_ipc(msg: &IpcMessage) -> Result<Self, IpcError> {
        msg.decode()
    }

    pub fn parse(body: &str) -> Result<Self, IpcError> {
        Self::from_ipc(&IpcRole::Service.parse(body)?)
    }
}

// =============================================================================
// CHROME -> HOST
// =============================================================================

/// Add-service form contents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddServiceRequest {
    pub catalog_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Subdomain for `___` templates, or a full URL for custom entries.
    #[serde(default)]
    pub url_input: Option<String>,
    #[serde(default)]
    pub align: Option<Align>,
    #[serde(default)]
    pub notifications: Option<bool>,
    #[serde(default)]
    pub muted: Option<bool>,
}

/// Messages from the chrome view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ChromeMessage {
    ChromeReady,
    ActivateTab {
        service_id: ServiceId,
    },
    AddService(AddServiceRequest),
    RemoveService {
        service_id: ServiceId,
    },
    RemoveAllServices,
    MoveService {
        service_id: ServiceId,
        align: Align,
        index: usize,
    },
    UpdateService {
        service_id: ServiceId,
        patch: ServicePatch,
    },
    SetEnabled {
        service_id: ServiceId,
        enabled: bool,
    },
    ReloadService {
        service_id: ServiceId,
    },
    Zoom {
        service_id: ServiceId,
        action: ZoomAction,
    },
    ToggleDontDisturb,
    /// A dialog opened or closed in the chrome.
    SetOverlay {
        open: bool,
    },
    InstallUpdate,
    DismissUpdate,
    ToggleDevtools {
        service_id: ServiceId,
    },
    GoBack {
        service_id: ServiceId,
    },
    GoForward {
        service_id: ServiceId,
    },
    /// Highlight the next match of `query`. An empty query ends the search.
    FindInPage {
        service_id: ServiceId,
        query: String,
        #[serde(default)]
        backwards: bool,
    },
}

impl ChromeMessage {
    pub fn from_ipc(msg: &IpcMessage) -> Result<Self, IpcError> {
        msg.decode()
    }

    pub fn parse(body: &str) -> Result<Self, IpcError> {
        Self::from_ipc(&IpcRole::Chrome.parse(body)?)
    }
}

// =============================================================================
// HOST -> CHROME
// =============================================================================

/// A message pushed from the host into the chrome view.
#[derive(Debug, Clone, PartialEq)]
pub struct HostMessage {
    pub kind: &'static str,
    pub payload: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Error,
}

impl HostMessage {
    /// The tab strip, the active service, and tabs whose view failed.
    /// Full records ride along for the settings dialog.
    pub fn tabs(
        strip: &TabStrip,
        services: &[Service],
        active: Option<ServiceId>,
        failed: &BTreeMap<ServiceId, String>,
    ) -> Self {
        let mut payload = serde_json::to_value(strip).unwrap_or_else(|_| json!({}));
        if payload.get("slots").is_none() {
            payload["slots"] = json!([]);
        }
        let records: BTreeMap<ServiceId, &Service> = services.iter().map(|s| (s.id, s)).collect();
        payload["services"] = json!(records);
        payload["active"] = json!(active);
        payload["failed"] = json!(failed);
        Self {
            kind: "tabs",
            payload,
        }
    }

    pub fn badges(badges: &BTreeMap<ServiceId, String>, total: u32) -> Self {
        Self {
            kind: "badges",
            payload: json!({ "badges": badges, "total": total }),
        }
    }

    /// Catalog entries as already prepared for the picker.
    pub fn catalog(entries: Value) -> Self {
        Self {
            kind: "catalog",
            payload: json!({ "entries": entries }),
        }
    }

    pub fn dont_disturb(enabled: bool) -> Self {
        Self {
            kind: "dont_disturb",
            payload: json!({ "enabled": enabled }),
        }
    }

    pub fn update_available(version: &str, notes: Option<&str>) -> Self {
        Self {
            kind: "update_available",
            payload: json!({ "version": version, "notes": notes }),
        }
    }

    pub fn toast(level: ToastLevel, text: impl Into<String>) -> Self {
        Self {
            kind: "toast",
            payload: json!({ "level": level, "text": text.into() }),
        }
    }

    pub fn to_script(&self) -> String {
        js_dispatch_message(self.kind, &self.payload)
    }
}

// =============================================================================
// JS SIDE
// =============================================================================

/// JavaScript snippet that sets up the IPC bridge on the JS side.
/// This is injected as an initialization script into every WebView.
pub const IPC_INIT_SCRIPT: &str = r#"
(function() {
    window.rambox = window.rambox || {};
    window.rambox.ipc = {
        postMessage: function(msg) {
            window.ipc.postMessage(JSON.stringify(msg));
        },
        send: function(kind, payload) {
            window.ipc.postMessage(JSON.stringify({
                kind: kind,
                payload: payload === undefined ? null : payload
            }));
        },
        // Callbacks registered by JS code to handle messages from Rust
        _handlers: {},
        on: function(kind, callback) {
            this._handlers[kind] = callback;
        },
        _dispatch: function(kind, payload) {
            var handler = this._handlers[kind];
            if (handler) {
                handler(payload);
            }
        }
    };
})();
"#;

/// Generate a JS snippet that dispatches a message to the JS IPC handler.
pub fn js_dispatch_message(kind: &str, payload: &Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.rambox.ipc._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rambox_services::TabStrip;

    // -- Role allowlists --

    #[test]
    fn service_role_rejects_chrome_kinds() {
        let body = r#"{"kind":"remove_all_services","payload":null}"#;
        let err = IpcRole::Service.parse(body).unwrap_err();
        assert!(matches!(err, IpcError::NotAllowed { role: "service", .. }));
    }

    #[test]
    fn chrome_role_rejects_service_kinds() {
        let body = r#"{"kind":"set_unread_count","payload":{"count":3}}"#;
        assert!(matches!(
            IpcRole::Chrome.parse(body).unwrap_err(),
            IpcError::NotAllowed { role: "chrome", .. }
        ));
    }

    #[test]
    fn unknown_kind_rejected_for_both_roles() {
        let body = r#"{"kind":"pty_input","payload":"rm -rf /"}"#;
        assert!(IpcRole::Chrome.parse(body).is_err());
        assert!(IpcRole::Service.parse(body).is_err());
    }

    #[test]
    fn role_for_view_id() {
        assert_eq!(IpcRole::for_view(0), IpcRole::Chrome);
        assert_eq!(IpcRole::for_view(1), IpcRole::Service);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(matches!(
            IpcRole::Service.parse("not json").unwrap_err(),
            IpcError::InvalidJson(_)
        ));
    }

    // -- Service messages --

    #[test]
    fn parses_set_unread_count_forms() {
        let n = ServiceMessage::parse(r#"{"kind":"set_unread_count","payload":{"count":4}}"#)
            .unwrap();
        assert_eq!(
            n,
            ServiceMessage::SetUnreadCount(UnreadPayload {
                count: UnreadCount::Exact(4)
            })
        );

        let dot = ServiceMessage::parse(r#"{"kind":"set_unread_count","payload":{"count":"•"}}"#)
            .unwrap();
        assert_eq!(
            dot,
            ServiceMessage::SetUnreadCount(UnreadPayload {
                count: UnreadCount::Unknown
            })
        );
    }

    #[test]
    fn negative_count_is_malformed() {
        let err = ServiceMessage::parse(r#"{"kind":"set_unread_count","payload":{"count":-2}}"#)
            .unwrap_err();
        assert!(matches!(err, IpcError::Malformed { .. }));
    }

    #[test]
    fn unit_service_messages_with_or_without_payload() {
        assert_eq!(
            ServiceMessage::parse(r#"{"kind":"clear_unread_count"}"#).unwrap(),
            ServiceMessage::ClearUnreadCount
        );
        assert_eq!(
            ServiceMessage::parse(r#"{"kind":"show_window_and_activate_tab","payload":null}"#)
                .unwrap(),
            ServiceMessage::ShowWindowAndActivateTab
        );
    }

    #[test]
    fn parses_page_notification() {
        let msg = ServiceMessage::parse(
            r#"{"kind":"notification","payload":{"title":"Ana","body":"hi","silent":true}}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ServiceMessage::Notification(PageNotification {
                title: "Ana".into(),
                body: "hi".into(),
                silent: true,
            })
        );

        let bare = ServiceMessage::parse(r#"{"kind":"notification","payload":{"title":"Ana"}}"#)
            .unwrap();
        let ServiceMessage::Notification(n) = bare else {
            panic!("expected notification");
        };
        assert!(n.body.is_empty());
        assert!(!n.silent);
    }

    // -- Chrome messages --

    #[test]
    fn parses_chrome_messages() {
        assert_eq!(
            ChromeMessage::parse(r#"{"kind":"chrome_ready","payload":null}"#).unwrap(),
            ChromeMessage::ChromeReady
        );
        assert_eq!(
            ChromeMessage::parse(r#"{"kind":"activate_tab","payload":{"service_id":3}}"#)
                .unwrap(),
            ChromeMessage::ActivateTab {
                service_id: ServiceId(3)
            }
        );
        assert_eq!(
            ChromeMessage::parse(
                r#"{"kind":"move_service","payload":{"service_id":2,"align":"right","index":0}}"#
            )
            .unwrap(),
            ChromeMessage::MoveService {
                service_id: ServiceId(2),
                align: Align::Right,
                index: 0
            }
        );
        assert_eq!(
            ChromeMessage::parse(
                r#"{"kind":"zoom","payload":{"service_id":1,"action":"reset"}}"#
            )
            .unwrap(),
            ChromeMessage::Zoom {
                service_id: ServiceId(1),
                action: ZoomAction::Reset
            }
        );
    }

    #[test]
    fn parses_page_tool_messages() {
        assert_eq!(
            ChromeMessage::parse(r#"{"kind":"toggle_devtools","payload":{"service_id":4}}"#)
                .unwrap(),
            ChromeMessage::ToggleDevtools {
                service_id: ServiceId(4)
            }
        );
        assert_eq!(
            ChromeMessage::parse(r#"{"kind":"go_back","payload":{"service_id":1}}"#).unwrap(),
            ChromeMessage::GoBack {
                service_id: ServiceId(1)
            }
        );
        assert_eq!(
            ChromeMessage::parse(
                r#"{"kind":"find_in_page","payload":{"service_id":2,"query":"invoice"}}"#
            )
            .unwrap(),
            ChromeMessage::FindInPage {
                service_id: ServiceId(2),
                query: "invoice".into(),
                backwards: false
            }
        );
    }

    #[test]
    fn parses_add_service_with_optional_fields() {
        let msg = ChromeMessage::parse(
            r#"{"kind":"add_service","payload":{"catalog_id":"slack","url_input":"acme","align":"right"}}"#,
        )
        .unwrap();
        let ChromeMessage::AddService(req) = msg else {
            panic!("expected add_service");
        };
        assert_eq!(req.catalog_id, "slack");
        assert_eq!(req.url_input.as_deref(), Some("acme"));
        assert_eq!(req.align, Some(Align::Right));
        assert!(req.name.is_none());
        assert!(req.muted.is_none());
    }

    #[test]
    fn parses_update_service_patch() {
        let msg = ChromeMessage::parse(
            r#"{"kind":"update_service","payload":{"service_id":5,"patch":{"muted":true,"name":"Team"}}}"#,
        )
        .unwrap();
        let ChromeMessage::UpdateService { service_id, patch } = msg else {
            panic!("expected update_service");
        };
        assert_eq!(service_id, ServiceId(5));
        assert_eq!(patch.muted, Some(true));
        assert_eq!(patch.name.as_deref(), Some("Team"));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let err = ChromeMessage::parse(r#"{"kind":"activate_tab","payload":{}}"#).unwrap_err();
        assert!(matches!(err, IpcError::Malformed { .. }));
    }

    #[test]
    fn every_allowed_chrome_kind_is_a_variant() {
        // Payload-less kinds parse directly; the rest must fail only on payload
        for kind in CHROME_IPC_KINDS {
            let body = format!(r#"{{"kind":"{kind}"}}"#);
            match ChromeMessage::parse(&body) {
                Ok(_) => {}
                Err(IpcError::Malformed { reason, .. }) => {
                    assert!(!reason.contains("unknown variant"), "{kind}: {reason}");
                }
                Err(e) => panic!("{kind}: {e}"),
            }
        }
    }

    // -- Host messages --

    #[test]
    fn tabs_message_shape() {
        let msg = HostMessage::tabs(&TabStrip::Empty, &[], None, &BTreeMap::new());
        assert_eq!(msg.kind, "tabs");
        assert_eq!(msg.payload["state"], "empty");
        assert_eq!(msg.payload["slots"], json!([]));
        assert!(msg.payload["active"].is_null());

        let loading = HostMessage::tabs(&TabStrip::Loading, &[], None, &BTreeMap::new());
        assert_eq!(loading.payload["state"], "loading");
    }

    #[test]
    fn tabs_message_carries_records_and_failures() {
        let service: Service = serde_json::from_value(json!({
            "id": 1, "type": "custom", "name": "Wiki", "url": "https://wiki.example/"
        }))
        .unwrap();
        let services = vec![service];
        let mut failed = BTreeMap::new();
        failed.insert(ServiceId(1), "webview creation failed".to_string());

        let msg = HostMessage::tabs(
            &TabStrip::materialize(&services),
            &services,
            Some(ServiceId(1)),
            &failed,
        );
        assert_eq!(msg.payload["state"], "tabs");
        assert_eq!(msg.payload["services"]["1"]["name"], "Wiki");
        assert_eq!(msg.payload["active"], 1);
        assert_eq!(msg.payload["failed"]["1"], "webview creation failed");
    }

    #[test]
    fn badges_message_uses_string_keys() {
        let mut badges = BTreeMap::new();
        badges.insert(ServiceId(2), "5".to_string());
        let msg = HostMessage::badges(&badges, 5);
        assert_eq!(msg.payload["badges"]["2"], "5");
        assert_eq!(msg.payload["total"], 5);
    }

    #[test]
    fn toast_and_update_messages() {
        let toast = HostMessage::toast(ToastLevel::Error, "Download failed");
        assert_eq!(toast.payload["level"], "error");
        let update = HostMessage::update_available("1.2.0", None);
        assert_eq!(update.payload["version"], "1.2.0");
        assert!(update.payload["notes"].is_null());
    }

    // -- JS side --

    #[test]
    fn dispatch_script_escapes_kind_and_payload() {
        let script = js_dispatch_message("toast", &json!({"text": "</script>\"x\""}));
        assert!(script.starts_with("window.rambox.ipc._dispatch(\"toast\", "));
        assert!(script.contains(r#"\"x\""#));
    }

    #[test]
    fn init_script_defines_bridge() {
        assert!(IPC_INIT_SCRIPT.contains("window.rambox.ipc"));
        assert!(IPC_INIT_SCRIPT.contains("_dispatch"));
    }
}

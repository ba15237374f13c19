//! Initialization scripts injected into service web views.
//!
//! A service page gets, in order:
//! 1. `IPC_INIT_SCRIPT` (the `window.rambox.ipc` bridge)
//! 2. the relay: `window.rambox` badge helpers and a `Notification` shim
//! 3. the catalog's badge script followed by the service's own
//! 4. the title-blink guard, for catalog entries that need it

use serde_json::json;

/// Per-service inputs to the injected scripts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceScriptOptions {
    pub notifications: bool,
    pub muted: bool,
    pub dont_disturb: bool,
    /// Catalog badge script.
    pub catalog_js_unread: String,
    /// The service's own badge script, run after the catalog's.
    pub custom_js_unread: String,
    pub title_blink: bool,
}

/// Title-based unread detection applies when no badge script is set.
pub fn uses_title_unread(catalog_js_unread: &str, custom_js_unread: &str) -> bool {
    catalog_js_unread.trim().is_empty() && custom_js_unread.trim().is_empty()
}

const RELAY_SCRIPT: &str = r#"
(function() {
    var state = window.__ramboxState;
    var send = function(kind, payload) { window.rambox.ipc.send(kind, payload); };

    window.rambox.setUnreadCount = function(count) {
        send('set_unread_count', { count: count });
    };
    window.rambox.clearUnreadCount = function() {
        send('clear_unread_count');
    };
    window.rambox.updateBadge = function(direct, indirect) {
        direct = parseInt(direct, 10) || 0;
        indirect = parseInt(indirect, 10) || 0;
        if (direct > 0) {
            window.rambox.setUnreadCount(direct);
        } else if (indirect > 0) {
            window.rambox.setUnreadCount('•');
        } else {
            window.rambox.clearUnreadCount();
        }
    };
    // Catalog badge scripts call hamsket.updateBadge(...)
    window.hamsket = window.rambox;

    var mediaMuted = function() { return state.muted || state.dontDisturb; };
    var muteElement = function(el, mute) {
        if (mute && !el.muted) {
            el.muted = true;
            el.dataset.ramboxMuted = '1';
        } else if (!mute && el.dataset.ramboxMuted) {
            el.muted = false;
            delete el.dataset.ramboxMuted;
        }
    };
    window.rambox._applyMute = function() {
        var els = document.querySelectorAll('audio, video');
        for (var i = 0; i < els.length; i++) {
            muteElement(els[i], mediaMuted());
        }
    };
    // Detached Audio() objects never show up in the DOM
    var play = HTMLMediaElement.prototype.play;
    HTMLMediaElement.prototype.play = function() {
        muteElement(this, mediaMuted());
        return play.apply(this, arguments);
    };
    document.addEventListener('DOMContentLoaded', window.rambox._applyMute);

    var Original = window.Notification;
    var nativeAllowed = function() {
        return !!Original && Original.permission === 'granted';
    };
    var inert = function() {
        return {
            close: function() {},
            addEventListener: function() {},
            removeEventListener: function() {},
            onclick: null
        };
    };
    var Shim = function(title, options) {
        var opts = Object.assign({}, options || {});
        if (!state.notifications || state.dontDisturb) {
            return inert();
        }
        if (state.muted) {
            opts.silent = true;
        }
        if (!nativeAllowed()) {
            send('notification', {
                title: String(title || ''),
                body: String(opts.body || ''),
                silent: !!opts.silent
            });
            return inert();
        }
        var n = new Original(title, opts);
        n.addEventListener('click', function() {
            send('show_window_and_activate_tab');
        });
        return n;
    };
    if (Original) {
        Shim.prototype = Original.prototype;
    }
    // The host shows what the engine can't, so pages always see a grant
    Object.defineProperty(Shim, 'permission', {
        get: function() { return 'granted'; }
    });
    Shim.requestPermission = function(callback) {
        if (Original && Original.requestPermission && Original.permission === 'default') {
            Original.requestPermission();
        }
        if (callback) { callback('granted'); }
        return Promise.resolve('granted');
    };
    window.Notification = Shim;
})();
"#;

/// Only let the page set titles that look like `(N) Title`, or restore the
/// original one.
const TITLE_BLINK_GUARD: &str = r#"
(function() {
    var originalTitle = document.title;
    var unread = /[(]([0-9•]+)[)] (.*)/;
    var el = function() { return document.getElementsByTagName('title')[0]; };
    Object.defineProperty(document, 'title', {
        configurable: true,
        set: function(value) {
            if (unread.test(value) || value === originalTitle) {
                var t = el();
                if (t) { t.textContent = value; }
            }
        },
        get: function() {
            var t = el();
            return t ? t.textContent : '';
        }
    });
})();
"#;

fn state_literal(notifications: bool, muted: bool, dont_disturb: bool) -> String {
    json!({
        "notifications": notifications,
        "muted": muted,
        "dontDisturb": dont_disturb,
    })
    .to_string()
}

/// Wrap a page-supplied badge script so a throw doesn't break the relay.
fn guarded(label: &str, js: &str) -> String {
    format!(
        "try {{\n{js}\n}} catch (e) {{ console.error('rambox: {label} badge script failed', e); }}\n"
    )
}

/// Everything a service view needs after the IPC bridge, as one script.
pub fn service_init_script(opts: &ServiceScriptOptions) -> String {
    let mut script = format!(
        "window.__ramboxState = {};\n",
        state_literal(opts.notifications, opts.muted, opts.dont_disturb)
    );
    script.push_str(RELAY_SCRIPT);

    if !opts.catalog_js_unread.trim().is_empty() {
        script.push_str(&guarded("catalog", &opts.catalog_js_unread));
    }
    if !opts.custom_js_unread.trim().is_empty() {
        script.push_str(&guarded("custom", &opts.custom_js_unread));
    }
    if opts.title_blink {
        script.push_str(TITLE_BLINK_GUARD);
    }
    script
}

/// Push changed notification settings into a live service view and
/// re-apply the media mute.
pub fn state_update_script(notifications: bool, muted: bool, dont_disturb: bool) -> String {
    format!(
        "if (window.__ramboxState) {{ Object.assign(window.__ramboxState, {}); \
         if (window.rambox && window.rambox._applyMute) {{ window.rambox._applyMute(); }} }}",
        state_literal(notifications, muted, dont_disturb)
    )
}

/// Find-in-page step: select the next (or previous) match, wrapping at the
/// ends. An empty query clears the selection.
pub fn find_in_page_script(query: &str, backwards: bool) -> String {
    if query.is_empty() {
        return "window.getSelection && window.getSelection().removeAllRanges();".to_string();
    }
    let literal = serde_json::to_string(query).unwrap_or_else(|_| "\"\"".to_string());
    format!("window.find({literal}, false, {backwards}, true, false, false, false);")
}

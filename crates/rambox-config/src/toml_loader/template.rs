//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Rambox Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[general]
# dont_disturb = false         # silence every notification
# start_minimized = false
# restore_last_active = true   # reopen the tab that was active on exit

[window]
# title = "Rambox"
# width = 1280                 # 400-7680
# height = 800                 # 300-4320
# startup_mode = "windowed"    # windowed, maximized, fullscreen
# tab_bar_height = 42          # 28-96

[catalog]
# url = "https://raw.githubusercontent.com/ramboxapp/community-edition/master/resources/services.json"
# icon_base_url = "https://raw.githubusercontent.com/ramboxapp/community-edition/master/resources/icons/"
# timeout_secs = 10            # 1-120

[notifications]
# enabled = true
# default_muted = false        # new services start muted

[services]
# default_user_agent = "Mozilla/5.0 ..."

[updates]
# check_automatically = true
# channel = "stable"           # stable, beta
# check_interval = 86400       # 3600-604800 seconds
# endpoint = "https://updates.rambox.app"

[logging]
# level = "INFO"               # DEBUG, INFO, WARNING, ERROR
# file_logging = true
# backup_count = 3             # 1-10 previous sessions
"##
    .to_string()
}

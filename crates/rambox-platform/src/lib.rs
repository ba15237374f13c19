pub mod crash_report;
pub mod launch;
pub mod notifications;
pub mod paths;

pub use launch::{is_external_url, launch_package, open_external};
pub use notifications::{notify, NativeNotification};
pub use paths::{
    cache_dir, config_dir, config_file, crash_report_dir, data_dir, ensure_dirs, log_dir,
    services_file, updates_dir,
};

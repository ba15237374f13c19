mod ensure;
mod resolve;

pub use ensure::ensure_dirs;
pub use resolve::{
    cache_dir, config_dir, config_file, crash_report_dir, data_dir, log_dir, services_file,
    updates_dir,
};

//! Update checker: asks the update server whether a newer build exists for
//! this platform and downloads it on request.
//!
//! The server is queried at `{endpoint}/update/{os}_{arch}/{version}`. It
//! answers 204 when the caller is current, or 200 with a JSON release.

mod check;
mod install;

pub use check::{parse_update_response, platform_key, update_url, UpdateChecker, UpdateRelease};
pub use install::{download_package, package_file_name};

/// Results sent from the update tasks back to the event loop.
#[derive(Debug)]
pub enum UpdateEvent {
    Available(UpdateRelease),
    Downloaded(std::path::PathBuf),
    Failed(String),
}

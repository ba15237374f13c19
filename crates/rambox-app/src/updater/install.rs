use std::path::{Path, PathBuf};

use rambox_common::RamboxError;

use super::UpdateRelease;

/// File name to store a downloaded package under: the last URL path
/// segment, restricted to safe characters.
pub fn package_file_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    let clean: String = last
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if clean.is_empty() || clean.chars().all(|c| c == '.') {
        "rambox-update".to_string()
    } else {
        clean
    }
}

/// Download `release` into `dir` and return the package path.
pub async fn download_package(release: &UpdateRelease, dir: &Path) -> Result<PathBuf, RamboxError> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(package_file_name(&release.url));
    let partial = target.with_extension("part");

    let response = reqwest::get(&release.url)
        .await
        .map_err(|e| RamboxError::Network(e.to_string()))?;
    if !response.status().is_success() {
        return Err(RamboxError::Update(format!(
            "download of {} answered HTTP {}",
            release.url,
            response.status()
        )));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| RamboxError::Network(e.to_string()))?;

    std::fs::write(&partial, &bytes)?;
    std::fs::rename(&partial, &target)?;
    tracing::info!(path = %target.display(), size = bytes.len(), "update downloaded");
    Ok(target)
}

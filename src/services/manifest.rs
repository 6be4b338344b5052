use crate::domain::constants::MANIFEST_REL_PATH;
use crate::domain::models::Manifest;
use crate::errors::EkitError;
use std::path::{Path, PathBuf};

pub fn manifest_path(repo: &Path) -> PathBuf {
    repo.join(MANIFEST_REL_PATH)
}

pub fn load_manifest(repo: &Path) -> anyhow::Result<Manifest> {
    let path = manifest_path(repo);
    if !path.exists() {
        return Err(EkitError::ManifestMissing(path.display().to_string()).into());
    }
    let raw = std::fs::read_to_string(&path)?;
    let manifest: Manifest =
        toml::from_str(&raw).map_err(|e| EkitError::ManifestInvalid(e.to_string()))?;

    if manifest.package.name.is_empty() {
        return Err(EkitError::ManifestInvalid("package.name is empty".to_string()).into());
    }
    if manifest.package.name.contains('/') || manifest.package.name.contains("..") {
        return Err(EkitError::ManifestInvalid(format!(
            "package.name must be a bare name: {}",
            manifest.package.name
        ))
        .into());
    }

    Ok(manifest)
}

use crate::domain::models::{CheckItem, Manifest, PublishReport};
use crate::errors::EkitError;
use std::path::Path;
use std::time::Duration;

/// `user@host:path` (or `host:path`) destinations go over scp; anything else
/// is treated as a local directory.
fn is_scp_dest(dest: &str) -> bool {
    match dest.split('/').next() {
        Some(head) => head.contains(':'),
        None => false,
    }
}

pub fn publish(archive: &Path, digests: &Path, dest: &str) -> anyhow::Result<PublishReport> {
    if !archive.exists() {
        return Err(EkitError::TransferFailed(format!(
            "archive not built: {}",
            archive.display()
        ))
        .into());
    }
    if !digests.exists() {
        return Err(EkitError::TransferFailed(format!(
            "DIGESTS not built: {}",
            digests.display()
        ))
        .into());
    }

    let mechanism = if is_scp_dest(dest) {
        let status = std::process::Command::new("scp")
            .arg(archive)
            .arg(digests)
            .arg(dest)
            .status()
            .map_err(|e| EkitError::TransferFailed(e.to_string()))?;
        if !status.success() {
            return Err(EkitError::TransferFailed(format!("scp to {}", dest)).into());
        }
        "scp"
    } else {
        let dir = Path::new(dest);
        std::fs::create_dir_all(dir)?;
        for src in [archive, digests] {
            let file_name = src
                .file_name()
                .ok_or_else(|| EkitError::TransferFailed(src.display().to_string()))?;
            std::fs::copy(src, dir.join(file_name))?;
        }
        "copy"
    };

    Ok(PublishReport {
        archive: archive.display().to_string(),
        digests: digests.display().to_string(),
        dest: dest.to_string(),
        mechanism: mechanism.to_string(),
    })
}

/// HEAD the published distfile URL, when one is configured.
pub fn verify_download_url(manifest: &Manifest, version: &str) -> CheckItem {
    let status = match &manifest.sdist.download_url {
        None => "not_configured".to_string(),
        Some(template) => {
            let url = template
                .replace("{name}", &manifest.package.name)
                .replace("{version}", version);
            let reachable = reqwest::blocking::Client::builder()
                .timeout(Duration::from_millis(3000))
                .build()
                .and_then(|client| client.head(url).send())
                .map(|resp| resp.status().is_success())
                .unwrap_or(false);
            if reachable { "ok" } else { "unreachable" }.to_string()
        }
    };
    CheckItem {
        name: "download_url".to_string(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::is_scp_dest;

    #[test]
    fn scp_destinations_are_detected_by_host_colon() {
        assert!(is_scp_dest("mirror@example.org:/space/distfiles"));
        assert!(is_scp_dest("example.org:distfiles"));
        assert!(!is_scp_dest("/var/tmp/distfiles"));
        assert!(!is_scp_dest("dist/out"));
        assert!(!is_scp_dest("dist/with:colon/later"));
    }
}

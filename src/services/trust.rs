use crate::errors::EkitError;
use std::path::{Path, PathBuf};

fn trusted_pubkeys_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/ekit/trust/pubkeys.txt"))
}

pub fn signature_path(digests: &Path) -> PathBuf {
    PathBuf::from(format!("{}.sig", digests.display()))
}

pub fn list_pubkeys() -> anyhow::Result<Vec<String>> {
    let path = trusted_pubkeys_path()?;
    if !path.exists() {
        return Ok(vec![]);
    }
    Ok(std::fs::read_to_string(path)?
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect())
}

pub fn trust_init(official_pubkey_hex: &str) -> anyhow::Result<()> {
    let path = trusted_pubkeys_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut existing = if path.exists() {
        std::fs::read_to_string(&path)?
    } else {
        String::new()
    };
    if !existing.lines().any(|l| l.trim() == official_pubkey_hex) {
        if !existing.is_empty() && !existing.ends_with('\n') {
            existing.push('\n');
        }
        existing.push_str(official_pubkey_hex);
        existing.push('\n');
        std::fs::write(path, existing)?;
    }
    Ok(())
}

fn load_trusted_pubkeys() -> anyhow::Result<Vec<ed25519_dalek::VerifyingKey>> {
    let mut out = Vec::new();
    for line in list_pubkeys()? {
        let bytes = match hex::decode(&line) {
            Ok(b) => b,
            Err(_) => continue,
        };
        if bytes.len() != 32 {
            continue;
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        if let Ok(key) = ed25519_dalek::VerifyingKey::from_bytes(&arr) {
            out.push(key);
        }
    }
    Ok(out)
}

/// True when any trusted key verifies any signature line in `<digests>.sig`.
pub fn verify_digests_signature(digests: &Path) -> anyhow::Result<bool> {
    let sig_file = signature_path(digests);
    if !digests.exists() || !sig_file.exists() {
        return Ok(false);
    }
    let keys = load_trusted_pubkeys()?;
    if keys.is_empty() {
        return Ok(false);
    }
    let raw = std::fs::read(digests)?;

    let mut signatures = Vec::new();
    for line in std::fs::read_to_string(sig_file)?.lines() {
        let l = line.trim();
        if l.is_empty() || l.starts_with('#') {
            continue;
        }
        let bytes = match hex::decode(l) {
            Ok(b) => b,
            Err(_) => continue,
        };
        let arr: [u8; 64] = match bytes.as_slice().try_into() {
            Ok(a) => a,
            Err(_) => continue,
        };
        signatures.push(ed25519_dalek::Signature::from_bytes(&arr));
    }

    for sig in signatures {
        for key in &keys {
            if key.verify_strict(&raw, &sig).is_ok() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Status for the readiness report: ok / unsigned / missing.
pub fn signature_status(digests: &Path) -> String {
    if !digests.exists() {
        return "missing".to_string();
    }
    if !signature_path(digests).exists() {
        return "unsigned".to_string();
    }
    match verify_digests_signature(digests) {
        Ok(true) => "ok".to_string(),
        _ => "invalid".to_string(),
    }
}

/// Sign via the operator's openssl; only verification is done in-process.
pub fn sign_digests(digests: &Path, sign_key: &str) -> anyhow::Result<PathBuf> {
    if !digests.exists() {
        return Err(EkitError::SignFailed(format!(
            "DIGESTS not built: {}",
            digests.display()
        ))
        .into());
    }
    let sig_file = signature_path(digests);
    let sig_bin = PathBuf::from(format!("{}.bin", sig_file.display()));

    let status = std::process::Command::new("openssl")
        .args([
            "pkeyutl",
            "-sign",
            "-inkey",
            sign_key,
            "-rawin",
            "-in",
            digests.to_string_lossy().as_ref(),
            "-out",
            sig_bin.to_string_lossy().as_ref(),
        ])
        .status()
        .map_err(|e| EkitError::SignFailed(e.to_string()))?;
    if !status.success() {
        return Err(EkitError::SignFailed("openssl signing failed".to_string()).into());
    }

    let bytes = std::fs::read(&sig_bin)?;
    std::fs::write(&sig_file, format!("{}\n", hex::encode(bytes)))?;
    let _ = std::fs::remove_file(sig_bin);
    Ok(sig_file)
}

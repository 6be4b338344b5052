use crate::domain::models::TagReport;
use crate::errors::EkitError;
use std::path::Path;
use std::process::Command;

fn git(repo: &Path, args: &[&str]) -> anyhow::Result<std::process::Output> {
    Ok(Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()?)
}

fn stderr_line(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stderr)
        .lines()
        .next()
        .unwrap_or("git failed")
        .to_string()
}

/// `Ok(None)` when the directory is not under version control.
pub fn work_tree_clean(repo: &Path) -> anyhow::Result<Option<bool>> {
    let out = git(repo, &["status", "--porcelain"])?;
    if !out.status.success() {
        return Ok(None);
    }
    Ok(Some(out.stdout.is_empty()))
}

pub fn create_tag(
    repo: &Path,
    version: &str,
    sign_key: Option<&str>,
    push: bool,
) -> anyhow::Result<TagReport> {
    match work_tree_clean(repo)? {
        Some(true) => {}
        Some(false) => return Err(EkitError::DirtyTree.into()),
        None => {
            return Err(
                EkitError::TagFailed("not a version-controlled repository".to_string()).into(),
            )
        }
    }

    let tag = format!("v{}", version);
    let message = format!("release {}", version);

    let out = match sign_key {
        Some(key) => git(repo, &["tag", "-s", "-u", key, "-m", &message, &tag])?,
        None => git(repo, &["tag", "-a", "-m", &message, &tag])?,
    };
    if !out.status.success() {
        return Err(EkitError::TagFailed(stderr_line(&out)).into());
    }

    if push {
        let out = git(repo, &["push", "origin", &tag])?;
        if !out.status.success() {
            return Err(EkitError::TagFailed(stderr_line(&out)).into());
        }
    }

    Ok(TagReport {
        tag,
        signed: sign_key.is_some(),
        pushed: push,
    })
}

use crate::domain::constants::LIVE_VERSION;
use crate::domain::models::{Manifest, StampEntry, StampReport};
use std::path::Path;

/// Explicit argument wins, then VERSION, then PVR, then the live sentinel.
pub fn resolve_version(explicit: Option<&str>) -> String {
    if let Some(v) = explicit {
        return v.to_string();
    }
    std::env::var("VERSION")
        .or_else(|_| std::env::var("PVR"))
        .unwrap_or_else(|_| LIVE_VERSION.to_string())
}

/// Live trees are stamped as "git" rather than "9999".
pub fn effective_version(version: &str) -> &str {
    if version == LIVE_VERSION {
        "git"
    } else {
        version
    }
}

/// Rewrite the quoted value at the start of `rest`, preserving the remainder
/// of the line. Accepts either quote style; always emits double quotes.
fn replace_quoted(rest: &str, value: &str) -> Option<String> {
    let mut chars = rest.chars();
    let open = chars.next()?;
    if open != '"' && open != '\'' {
        return None;
    }
    let tail = chars.as_str();
    let end = tail.find(|c| c == '"' || c == '\'')?;
    Some(format!("\"{}\"{}", value, &tail[end + 1..]))
}

fn stamp_assignment(line: &str, prefix: &str, value: &str) -> Option<String> {
    let rest = line.strip_prefix(prefix)?;
    Some(format!("{}{}", prefix, replace_quoted(rest, value)?))
}

/// Man pages carry the version in the third `.TH` field:
/// `.TH "EBUMP" "1" "<version>" ...`
fn stamp_man_heading(line: &str, title: &str, value: &str) -> Option<String> {
    let prefix = format!(".TH \"{}\" \"", title);
    let rest = line.strip_prefix(prefix.as_str())?;
    let mut chars = rest.chars();
    let section = chars.next()?;
    if !section.is_ascii_digit() {
        return None;
    }
    let rest = chars.as_str().strip_prefix("\" ")?;
    Some(format!(
        ".TH \"{}\" \"{}\" {}",
        title,
        section,
        replace_quoted(rest, value)?
    ))
}

/// Apply `rewrite` to the first matching line only.
fn rewrite_first(raw: &str, rewrite: impl Fn(&str) -> Option<String>) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut matched = false;
    for line in raw.lines() {
        if !matched {
            if let Some(new_line) = rewrite(line) {
                lines.push(new_line);
                matched = true;
                continue;
            }
        }
        lines.push(line.to_string());
    }
    if !matched {
        return None;
    }
    let mut out = lines.join("\n");
    if raw.ends_with('\n') {
        out.push('\n');
    }
    Some(out)
}

fn stamp_file(
    repo: &Path,
    rel: &str,
    rewrite: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<StampEntry> {
    let path = repo.join(rel);
    if !path.exists() {
        return Ok(StampEntry {
            path: rel.to_string(),
            status: "missing".to_string(),
        });
    }
    let raw = std::fs::read_to_string(&path)?;
    let status = match rewrite_first(&raw, rewrite) {
        Some(updated) if updated != raw => {
            std::fs::write(&path, updated)?;
            "stamped"
        }
        Some(_) => "stamped",
        None => "unchanged",
    };
    Ok(StampEntry {
        path: rel.to_string(),
        status: status.to_string(),
    })
}

pub fn stamp_version(
    repo: &Path,
    manifest: &Manifest,
    version: &str,
) -> anyhow::Result<StampReport> {
    let value = effective_version(version).to_string();
    let mut entries = Vec::new();

    for rel in &manifest.stamp.shell_scripts {
        entries.push(stamp_file(repo, rel, |l| {
            stamp_assignment(l, "VERSION=", &value)
        })?);
    }
    for rel in &manifest.stamp.script_modules {
        entries.push(stamp_file(repo, rel, |l| {
            stamp_assignment(l, "__version__ = ", &value)
        })?);
    }
    for page in &manifest.stamp.man_pages {
        entries.push(stamp_file(repo, &page.path, |l| {
            stamp_man_heading(l, &page.title, &value)
        })?);
    }

    Ok(StampReport {
        version: value,
        entries,
    })
}

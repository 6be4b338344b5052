use crate::domain::models::{CheckItem, Manifest, ReleaseCheckReport, ToolRun};
use crate::services::vcs;
use std::path::Path;
use std::process::Command;

/// Run one configured external tool, inheriting stdio so its own output is
/// visible. An empty argv means the tool is not configured.
pub fn run_tool(repo: &Path, tool: &str, argv: &[String]) -> anyhow::Result<ToolRun> {
    if argv.is_empty() {
        return Ok(ToolRun {
            tool: tool.to_string(),
            status: "not_configured".to_string(),
            exit_code: None,
        });
    }
    let status = Command::new(&argv[0])
        .args(&argv[1..])
        .current_dir(repo)
        .status()?;
    Ok(ToolRun {
        tool: tool.to_string(),
        status: if status.success() { "ok" } else { "failed" }.to_string(),
        exit_code: status.code(),
    })
}

pub fn tool_check(run: &ToolRun) -> CheckItem {
    CheckItem {
        name: run.tool.clone(),
        status: run.status.clone(),
    }
}

pub fn work_tree_check(repo: &Path) -> CheckItem {
    let status = match vcs::work_tree_clean(repo) {
        Ok(Some(true)) => "ok",
        Ok(Some(false)) => "dirty",
        Ok(None) | Err(_) => "not_provided",
    };
    CheckItem {
        name: "work_tree".to_string(),
        status: status.to_string(),
    }
}

pub fn stamp_targets_check(repo: &Path, manifest: &Manifest) -> CheckItem {
    let mut paths: Vec<&str> = Vec::new();
    paths.extend(manifest.stamp.shell_scripts.iter().map(String::as_str));
    paths.extend(manifest.stamp.script_modules.iter().map(String::as_str));
    paths.extend(manifest.stamp.man_pages.iter().map(|p| p.path.as_str()));

    let status = if paths.is_empty() {
        "not_configured"
    } else if paths.iter().all(|p| repo.join(p).exists()) {
        "ok"
    } else {
        "missing"
    };
    CheckItem {
        name: "stamp_targets".to_string(),
        status: status.to_string(),
    }
}

fn passing(status: &str) -> bool {
    matches!(status, "ok" | "not_configured" | "not_provided")
}

fn recommendation(check: &CheckItem) -> Option<String> {
    if passing(&check.status) {
        return None;
    }
    let text = match check.name.as_str() {
        "work_tree" => "Commit or stash local changes before releasing.",
        "fmt_check" => "Run `ekit fmt` and commit the formatting changes.",
        "tests" => "Run `ekit test` and fix failures before releasing.",
        "lint" => "Run `ekit lint` and resolve its findings.",
        "stamp_targets" => "Fix the [stamp] paths in .ekit/release.toml; some files are missing.",
        "download_url" => "Run `ekit publish` so the configured download URL resolves.",
        "digests_signature" => "Run `ekit sign --sign-key <key>` on the latest DIGESTS file.",
        _ => return Some(format!("Resolve check `{}` ({}).", check.name, check.status)),
    };
    Some(text.to_string())
}

pub fn build_release_check_report(checks: Vec<CheckItem>) -> ReleaseCheckReport {
    let overall = if checks.iter().all(|c| passing(&c.status)) {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();
    let recommendations = checks.iter().filter_map(recommendation).collect();
    ReleaseCheckReport {
        overall,
        checks,
        recommendations,
    }
}

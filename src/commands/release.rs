use crate::cli::{Cli, Commands};
use crate::domain::models::{CheckItem, ReleaseRecord};
use crate::errors::EkitError;
use crate::services::output::{print_one, print_out};
use crate::services::{archive, checks, manifest, publish, storage, trust, vcs, version};
use std::path::{Path, PathBuf};

fn repo_path(cli: &Cli) -> PathBuf {
    PathBuf::from(&cli.repo)
}

fn run_named_tool(cli: &Cli, tool: &str, argv: &[String]) -> anyhow::Result<()> {
    let run = checks::run_tool(&repo_path(cli), tool, argv)?;
    let failed = run.status == "failed";
    print_one(cli.json, &run, |r| format!("{}\t{}", r.tool, r.status))?;
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Locate the sdist pair for a version under the chosen output directory.
fn dist_paths(cli: &Cli, name: &str, version: &str, out: &str) -> (PathBuf, PathBuf) {
    let out_dir = repo_path(cli).join(out);
    (
        archive::archive_path(&out_dir, name, version),
        archive::digests_path(&out_dir, name, version),
    )
}

pub fn handle_release_commands(cli: &Cli) -> anyhow::Result<()> {
    let repo = repo_path(cli);

    match &cli.command {
        Commands::Fmt { check } => {
            let m = manifest::load_manifest(&repo)?;
            let argv = if *check { &m.tools.fmt_check } else { &m.tools.fmt };
            let tool = if *check { "fmt_check" } else { "fmt" };
            run_named_tool(cli, tool, argv)?;
        }
        Commands::Test => {
            let m = manifest::load_manifest(&repo)?;
            run_named_tool(cli, "tests", &m.tools.test)?;
        }
        Commands::Lint => {
            let m = manifest::load_manifest(&repo)?;
            run_named_tool(cli, "lint", &m.tools.lint)?;
        }
        Commands::SetVersion { version: v } => {
            let m = manifest::load_manifest(&repo)?;
            let report = version::stamp_version(&repo, &m, v)?;
            storage::audit(
                "set_version",
                serde_json::json!({"version": report.version, "files": report.entries.len()}),
            );
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&crate::domain::models::JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!("set version {}", report.version);
                for e in &report.entries {
                    println!("{}\t{}", e.path, e.status);
                }
            }
        }
        Commands::Sdist { version: v, out } => {
            let m = manifest::load_manifest(&repo)?;
            let ver = version::resolve_version(v.as_deref());
            let report = archive::build_sdist(&repo, &m, &ver, &repo.join(out))?;
            storage::record_release(ReleaseRecord {
                name: report.name.clone(),
                version: report.version.clone(),
                archive: report.archive.clone(),
                sha256: report.sha256.clone(),
                ts: storage::unix_ts(),
            })?;
            storage::audit(
                "sdist",
                serde_json::json!({"version": report.version, "archive": report.archive}),
            );
            print_one(cli.json, &report, |r| {
                format!("wrote {} (sha256 {})", r.archive, r.sha256)
            })?;
        }
        Commands::Publish { version: v, out, dest } => {
            let m = manifest::load_manifest(&repo)?;
            let ver = version::resolve_version(v.as_deref());
            let dest = dest
                .clone()
                .or_else(|| m.publish.dest.clone())
                .ok_or_else(|| {
                    EkitError::TransferFailed("no destination configured".to_string())
                })?;
            let (archive_file, digests_file) = dist_paths(cli, &m.package.name, &ver, out);
            let report = publish::publish(&archive_file, &digests_file, &dest)?;
            storage::audit(
                "publish",
                serde_json::json!({"version": ver, "dest": report.dest}),
            );
            print_one(cli.json, &report, |r| {
                format!("published {} -> {} ({})", r.archive, r.dest, r.mechanism)
            })?;
        }
        Commands::Tag { version: v, sign_key, push } => {
            let ver = version::resolve_version(v.as_deref());
            if ver == crate::domain::constants::LIVE_VERSION {
                return Err(EkitError::LiveVersion.into());
            }
            let report = vcs::create_tag(&repo, &ver, sign_key.as_deref(), *push)?;
            storage::audit(
                "tag",
                serde_json::json!({"tag": report.tag, "pushed": report.pushed}),
            );
            print_one(cli.json, &report, |r| {
                format!(
                    "tagged {}{}{}",
                    r.tag,
                    if r.signed { " (signed)" } else { "" },
                    if r.pushed { " (pushed)" } else { "" }
                )
            })?;
        }
        Commands::Sign { version: v, out, sign_key } => {
            let m = manifest::load_manifest(&repo)?;
            let ver = version::resolve_version(v.as_deref());
            let (_, digests_file) = dist_paths(cli, &m.package.name, &ver, out);
            let sig = trust::sign_digests(&digests_file, sign_key)?;
            storage::audit("sign", serde_json::json!({"digests": digests_file.display().to_string()}));
            print_one(cli.json, sig.display().to_string(), |s| {
                format!("signed: {}", s)
            })?;
        }
        Commands::Check => {
            let m = manifest::load_manifest(&repo)?;
            let report = assemble_release_check(&repo, &m)?;
            print_one(cli.json, &report, |r| format!("release-check: {}", r.overall))?;
        }
        Commands::History => {
            let state = storage::load_state()?;
            print_out(cli.json, &state.releases, |r| {
                format!("{}\t{}\t{}", r.version, r.archive, r.ts)
            })?;
        }
        Commands::Meta { .. } | Commands::Trust { .. } => {
            unreachable!("handled before release dispatch")
        }
    }

    Ok(())
}

fn assemble_release_check(
    repo: &Path,
    m: &crate::domain::models::Manifest,
) -> anyhow::Result<crate::domain::models::ReleaseCheckReport> {
    let mut items = vec![
        CheckItem {
            name: "manifest".to_string(),
            status: "ok".to_string(),
        },
        checks::work_tree_check(repo),
    ];

    for (tool, argv) in [
        ("fmt_check", &m.tools.fmt_check),
        ("tests", &m.tools.test),
        ("lint", &m.tools.lint),
    ] {
        items.push(checks::tool_check(&checks::run_tool(repo, tool, argv)?));
    }

    items.push(checks::stamp_targets_check(repo, m));

    let state = storage::load_state()?;
    let latest = state
        .releases
        .iter()
        .rev()
        .find(|r| r.name == m.package.name);
    match latest {
        None => {
            items.push(CheckItem {
                name: "download_url".to_string(),
                status: "not_provided".to_string(),
            });
            items.push(CheckItem {
                name: "digests_signature".to_string(),
                status: "not_provided".to_string(),
            });
        }
        Some(rec) => {
            items.push(publish::verify_download_url(m, &rec.version));
            let digests = PathBuf::from(format!("{}.DIGESTS", rec.archive));
            items.push(CheckItem {
                name: "digests_signature".to_string(),
                status: trust::signature_status(&digests),
            });
        }
    }

    Ok(checks::build_release_check_report(items))
}

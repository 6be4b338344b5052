use crate::cli::{Cli, Commands, MetaCommands};
use crate::domain::models::JsonOut;
use crate::metadata::{self, MetaData};
use crate::services::output::{print_one, print_out};

fn maintainer_row(m: &crate::metadata::Maintainer) -> String {
    format!(
        "{}\t{}",
        m.email.as_deref().unwrap_or("-"),
        m.name.as_deref().unwrap_or("-")
    )
}

pub fn handle_meta_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Meta { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        MetaCommands::Show { pkg } => {
            let md = MetaData::from_path(pkg)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok: true, data: md })?
                );
            } else {
                println!("metadata: {}", md.path);
                for d in &md.descriptions {
                    println!("description: {}", d.split_whitespace().collect::<Vec<_>>().join(" "));
                }
                for m in &md.maintainers {
                    println!("maintainer: {}", maintainer_row(m));
                }
                for f in &md.use_flags {
                    println!(
                        "use: {}\t{}",
                        f.name.as_deref().unwrap_or("-"),
                        f.description
                    );
                }
                for up in &md.upstreams {
                    for r in &up.remote_ids {
                        println!(
                            "upstream: {}\t{}",
                            r.site.as_deref().unwrap_or("-"),
                            r.id
                        );
                    }
                }
            }
        }
        MetaCommands::Maintainers { pkg } => {
            let md = MetaData::from_path(pkg)?;
            print_out(cli.json, &md.maintainers, maintainer_row)?;
        }
        MetaCommands::Use { pkg } => {
            let md = MetaData::from_path(pkg)?;
            print_out(cli.json, &md.use_flags, |f| {
                format!("{}\t{}", f.name.as_deref().unwrap_or("-"), f.description)
            })?;
        }
        MetaCommands::Upstream { pkg } => {
            let md = MetaData::from_path(pkg)?;
            print_out(cli.json, &md.upstreams, |up| {
                let ids: Vec<String> = up
                    .remote_ids
                    .iter()
                    .map(|r| format!("{}:{}", r.site.as_deref().unwrap_or("-"), r.id))
                    .collect();
                format!(
                    "maintainers={}\tchangelogs={}\tremote-ids={}",
                    up.maintainers.len(),
                    up.changelogs.len(),
                    ids.join(",")
                )
            })?;
        }
        MetaCommands::Validate { pkg } => {
            let md = MetaData::from_path(pkg)?;
            let issues = metadata::validate(&md);
            if issues.is_empty() {
                print_one(cli.json, "valid", |_| "metadata valid".to_string())?;
            } else {
                print_out(cli.json, &issues, |i| format!("{}\t{}", i.kind, i.detail))?;
                std::process::exit(1);
            }
        }
    }

    Ok(true)
}

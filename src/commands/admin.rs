use crate::cli::{Cli, Commands, TrustCommands};
use crate::domain::constants::OFFICIAL_RELEASE_PUBKEY_HEX;
use crate::domain::models::TrustStatus;
use crate::services::output::{print_one, print_out};
use crate::services::{storage, trust};
use std::path::PathBuf;

pub fn handle_trust_commands(cli: &Cli) -> anyhow::Result<bool> {
    let Commands::Trust { command } = &cli.command else {
        return Ok(false);
    };

    match command {
        TrustCommands::Init => {
            trust::trust_init(OFFICIAL_RELEASE_PUBKEY_HEX)?;
            storage::audit("trust_init", serde_json::json!({}));
            print_one(cli.json, "initialized", |_| {
                "trust initialized (official release key installed)".to_string()
            })?;
        }
        TrustCommands::List => {
            let keys = trust::list_pubkeys()?;
            print_out(cli.json, &keys, |k| k.to_string())?;
        }
        TrustCommands::Status => {
            let state = storage::load_state()?;
            let latest = state.releases.last();
            let signature_ok = latest
                .map(|r| {
                    let digests = PathBuf::from(format!("{}.DIGESTS", r.archive));
                    trust::verify_digests_signature(&digests).unwrap_or(false)
                })
                .unwrap_or(false);
            let status = TrustStatus {
                trusted_key_count: trust::list_pubkeys()?.len(),
                latest_release: latest.map(|r| r.version.clone()),
                signature_ok,
            };
            print_one(cli.json, status, |s| {
                format!(
                    "keys={} latest={} sig_ok={}",
                    s.trusted_key_count,
                    s.latest_release.as_deref().unwrap_or("none"),
                    s.signature_ok
                )
            })?;
        }
    }

    Ok(true)
}

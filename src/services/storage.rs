use crate::domain::models::{ReleaseRecord, State};
use std::path::PathBuf;

pub fn unix_ts() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}

/// Best-effort append-only audit trail; never fails a command.
pub fn audit(action: &str, data: serde_json::Value) {
    let home = match std::env::var("HOME") {
        Ok(h) => h,
        Err(_) => return,
    };
    let path = PathBuf::from(home).join(".config/ekit/audit.jsonl");
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_ts(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let _ = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
}

fn state_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/ekit/state.json"))
}

pub fn load_state() -> anyhow::Result<State> {
    let path = state_path()?;
    if !path.exists() {
        return Ok(State::default());
    }
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn save_state(state: &State) -> anyhow::Result<()> {
    let path = state_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(state)?)?;
    Ok(())
}

/// Rebuilding the same version replaces its record instead of duplicating it.
pub fn record_release(record: ReleaseRecord) -> anyhow::Result<()> {
    let mut state = load_state()?;
    if let Some(existing) = state
        .releases
        .iter_mut()
        .find(|r| r.name == record.name && r.version == record.version)
    {
        *existing = record;
    } else {
        state.releases.push(record);
    }
    save_state(&state)
}

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// `.ekit/release.toml` — everything a release run needs to know about the
/// repository. Unknown keys are rejected so typos fail loudly.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub package: PackageSection,
    #[serde(default)]
    pub tools: ToolsSection,
    #[serde(default)]
    pub stamp: StampSection,
    #[serde(default)]
    pub sdist: SdistSection,
    #[serde(default)]
    pub publish: PublishSection,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Argv vectors for the external tools. Empty means not configured.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ToolsSection {
    #[serde(default)]
    pub fmt: Vec<String>,
    #[serde(default)]
    pub fmt_check: Vec<String>,
    #[serde(default)]
    pub test: Vec<String>,
    #[serde(default)]
    pub lint: Vec<String>,
}

/// Files that receive a hardcoded version string at release time.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StampSection {
    #[serde(default)]
    pub shell_scripts: Vec<String>,
    #[serde(default)]
    pub script_modules: Vec<String>,
    #[serde(default)]
    pub man_pages: Vec<ManPage>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ManPage {
    pub path: String,
    pub title: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SdistSection {
    #[serde(default)]
    pub include: Vec<String>,
    /// Template with `{name}` / `{version}` placeholders.
    #[serde(default)]
    pub download_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PublishSection {
    /// Local directory or `user@host:path` scp destination.
    #[serde(default)]
    pub dest: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct State {
    pub releases: Vec<ReleaseRecord>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReleaseRecord {
    pub name: String,
    pub version: String,
    pub archive: String,
    pub sha256: String,
    pub ts: String,
}

#[derive(Serialize, Clone)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct ToolRun {
    pub tool: String,
    pub status: String,
    pub exit_code: Option<i32>,
}

#[derive(Serialize)]
pub struct StampEntry {
    pub path: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct StampReport {
    pub version: String,
    pub entries: Vec<StampEntry>,
}

#[derive(Serialize, Debug)]
pub struct SdistReport {
    pub name: String,
    pub version: String,
    pub archive: String,
    pub digests: String,
    pub sha256: String,
    pub entries: usize,
}

#[derive(Serialize)]
pub struct PublishReport {
    pub archive: String,
    pub digests: String,
    pub dest: String,
    pub mechanism: String,
}

#[derive(Serialize)]
pub struct TagReport {
    pub tag: String,
    pub signed: bool,
    pub pushed: bool,
}

#[derive(Serialize)]
pub struct TrustStatus {
    pub trusted_key_count: usize,
    pub latest_release: Option<String>,
    pub signature_ok: bool,
}

#[derive(Serialize)]
pub struct ReleaseCheckReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
    pub recommendations: Vec<String>,
}

use thiserror::Error;

/// Failures with a stable machine-readable code.
///
/// The code ends up in the `--json` error envelope, so renaming a variant's
/// code is a breaking change for integrations (see `docs/contracts/`).
#[derive(Error, Debug)]
pub enum EkitError {
    #[error("release manifest not found: {0}")]
    ManifestMissing(String),
    #[error("invalid release manifest: {0}")]
    ManifestInvalid(String),
    #[error("cannot read metadata for {0}")]
    MetaRead(String),
    #[error("cannot parse metadata.xml: {0}")]
    MetaParse(String),
    #[error("live version 9999 cannot be packaged; pass --version or set VERSION")]
    LiveVersion,
    #[error("sdist input missing: {0}")]
    SdistInputMissing(String),
    #[error("work tree has uncommitted changes")]
    DirtyTree,
    #[error("tag operation failed: {0}")]
    TagFailed(String),
    #[error("transfer failed: {0}")]
    TransferFailed(String),
    #[error("signing failed: {0}")]
    SignFailed(String),
}

impl EkitError {
    pub fn code(&self) -> &'static str {
        match self {
            EkitError::ManifestMissing(_) => "MANIFEST_MISSING",
            EkitError::ManifestInvalid(_) => "MANIFEST_INVALID",
            EkitError::MetaRead(_) => "META_READ",
            EkitError::MetaParse(_) => "META_PARSE",
            EkitError::LiveVersion => "LIVE_VERSION",
            EkitError::SdistInputMissing(_) => "SDIST_INPUT_MISSING",
            EkitError::DirtyTree => "DIRTY_TREE",
            EkitError::TagFailed(_) => "TAG_FAILED",
            EkitError::TransferFailed(_) => "TRANSFER_FAILED",
            EkitError::SignFailed(_) => "SIGN_FAILED",
        }
    }
}

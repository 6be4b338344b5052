/// Sentinel for a live (unreleased) tree. Stamped as "git", never packaged.
pub const LIVE_VERSION: &str = "9999";

/// Manifest location relative to the repository root.
pub const MANIFEST_REL_PATH: &str = ".ekit/release.toml";

/// ed25519 public key (hex) used to sign official release DIGESTS files.
pub const OFFICIAL_RELEASE_PUBKEY_HEX: &str =
    "1bb6e7f1f06e8af5e8c50da2eb7df2a188f1c2a332b351ae507cbd1e2f06d5b9";

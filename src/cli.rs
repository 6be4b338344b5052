use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ekit", version, about = "Toolkit release and metadata CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Toolkit repository root (containing .ekit/release.toml)"
    )]
    pub repo: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query a package's metadata.xml
    Meta {
        #[command(subcommand)]
        command: MetaCommands,
    },
    /// Run the configured formatter over the tree
    Fmt {
        #[arg(long, default_value_t = false)]
        check: bool,
    },
    /// Run the configured test suite
    Test,
    /// Run the configured linter
    Lint,
    /// Hardcode a version into the files listed in the manifest
    SetVersion { version: String },
    /// Build the source distribution archive and its DIGESTS file
    Sdist {
        #[arg(long)]
        version: Option<String>,
        #[arg(long, default_value = "dist")]
        out: String,
    },
    /// Transfer a built archive and DIGESTS to the distfile destination
    Publish {
        #[arg(long)]
        version: Option<String>,
        #[arg(long, default_value = "dist")]
        out: String,
        #[arg(long)]
        dest: Option<String>,
    },
    /// Create (and optionally push) the release tag
    Tag {
        #[arg(long)]
        version: Option<String>,
        #[arg(long)]
        sign_key: Option<String>,
        #[arg(long, default_value_t = false)]
        push: bool,
    },
    /// Sign a built DIGESTS file with the release key
    Sign {
        #[arg(long)]
        version: Option<String>,
        #[arg(long, default_value = "dist")]
        out: String,
        #[arg(long)]
        sign_key: String,
    },
    /// Release readiness report
    Check,
    /// List past releases recorded by sdist
    History,
    /// Manage trusted release keys
    Trust {
        #[command(subcommand)]
        command: TrustCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum MetaCommands {
    Show { pkg: String },
    Maintainers { pkg: String },
    Use { pkg: String },
    Upstream { pkg: String },
    Validate { pkg: String },
}

#[derive(Subcommand, Debug)]
pub enum TrustCommands {
    Init,
    List,
    Status,
}

//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Environment variable holding the store password.
pub const PASSWORD_ENV: &str = "ETCD_ENVOY_PASSWORD";

/// Discover ecpr-configured customers and write the customer spec file.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "custspec", author, version, about, long_about = None)]
pub struct Args {
    /// Settings file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the customer spec file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Environment to collect, by name; repeat to collect several in order
    #[arg(short = 'e', long = "env", value_name = "NAME")]
    pub environments: Vec<String>,

    /// Treat store errors other than 404 as failures instead of absent data
    #[arg(long)]
    pub strict: bool,

    /// Print the YAML to stdout instead of writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Store password
    #[arg(long, env = PASSWORD_ENV, hide = true)]
    pub password: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

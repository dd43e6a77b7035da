use clap::{Args, Subcommand};

use crate::modules::storage::StorageKind;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Persist client settings")]
    Set(ConfigSetArgs),
    #[command(about = "Print the effective settings")]
    Show,
    #[command(about = "Forget persisted settings")]
    Reset,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    #[arg(long, help = "API base address, absolute or relative to the origin")]
    pub api_url: Option<String>,
    #[arg(long, help = "Origin the client is served from")]
    pub origin: Option<String>,
    #[arg(long, value_enum)]
    pub storage: Option<StorageKind>,
}

#[derive(Args)]
pub struct OpenArgs {
    #[arg(help = "Route to open, e.g. /dashboard or /login?error=access_denied")]
    pub path: String,
}

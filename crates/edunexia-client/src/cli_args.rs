use clap::{ArgAction, Parser, Subcommand};

pub use crate::modules::auth::args::*;
pub use crate::modules::callback::args::*;
pub use crate::modules::system::args::*;

use crate::modules::storage::StorageKind;

#[derive(Parser)]
#[command(name = "edunexia")]
#[command(about = "EduNexia client")]
pub struct Cli {
    #[arg(long, env = "EDUNEXIA_API_URL", help = "API base address (default /api/v1)")]
    pub api_url: Option<String>,
    #[arg(long, env = "EDUNEXIA_ORIGIN", help = "Origin the client is served from")]
    pub origin: Option<String>,
    #[arg(long, env = "EDUNEXIA_STORAGE", value_enum)]
    pub storage: Option<StorageKind>,
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    #[command(about = "Complete a sign-in redirect")]
    Callback(CallbackArgs),
    #[command(about = "Show the signed-in student's profile")]
    Whoami,
    #[command(about = "Open a route through the route guard")]
    Open(OpenArgs),
    Status,
    Config(ConfigArgs),
}

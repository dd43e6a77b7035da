use clap::{Args, Subcommand};

#[derive(Args)]
pub struct LoginArgs {
    #[command(subcommand)]
    pub command: Option<LoginCommand>,
}

#[derive(Subcommand)]
pub enum LoginCommand {
    #[command(about = "Sign in with username and password")]
    Password(LoginPasswordArgs),
    #[command(about = "Print the Google sign-in address")]
    Google,
}

#[derive(Args)]
pub struct LoginPasswordArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long, env = "EDUNEXIA_PASSWORD")]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long, env = "EDUNEXIA_PASSWORD")]
    pub password: Option<String>,
}

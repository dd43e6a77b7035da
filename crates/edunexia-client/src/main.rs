use clap::Parser;
use std::io::{self, Write};
use std::sync::Arc;

mod cli_args;
mod cli_command;
mod modules;


use crate::cli_args::*;
use crate::cli_command::handle_command;
use crate::modules::storage::{open_backend, TokenStore};
use crate::modules::system::{handle_config_command, load_config, resolve_settings, save_config};
use crate::modules::system::AppContext;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let mut config = load_config()?;
    let settings = resolve_settings(cli.api_url, cli.origin, cli.storage, &config)?;

    match cli.command {
        Command::Config(args) => {
            handle_config_command(args, &mut config, &settings)?;
            save_config(&config)?;
        }
        command => {
            let backend = open_backend(settings.storage)?;
            let app = AppContext {
                client: reqwest::Client::new(),
                store: TokenStore::new(Arc::from(backend)),
                settings,
            };
            handle_command(command, &app).await?;
        }
    }

    Ok(())
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter)?)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

pub(crate) fn prompt_login_command() -> anyhow::Result<LoginCommand> {
    let method = prompt_line("Login method (password/google): ")?;
    match method.trim() {
        "password" => {
            let username = prompt_line("Username: ")?;
            if username.is_empty() {
                anyhow::bail!("username is required");
            }
            let password = prompt_password("Password: ")?;
            Ok(LoginCommand::Password(LoginPasswordArgs {
                username,
                password: Some(password),
            }))
        }
        "google" => Ok(LoginCommand::Google),
        _ => anyhow::bail!("unknown login method"),
    }
}

fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    let mut input = String::new();
    print!("{prompt}");
    io::stdout().flush()?;
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub(crate) fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;
    if password.trim().is_empty() {
        anyhow::bail!("password is required");
    }
    Ok(password)
}

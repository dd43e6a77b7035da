use crate::cli_args::*;
use crate::modules::auth::{handle_login_command, handle_logout, handle_register};
use crate::modules::callback::handle_callback;
use crate::modules::students::handle_whoami;
use crate::modules::system::{handle_open, handle_status, AppContext};

pub(crate) async fn handle_command(command: Command, app: &AppContext) -> anyhow::Result<()> {
    match command {
        Command::Login(args) => handle_login_command(args, app).await?,
        Command::Register(args) => handle_register(args, app).await?,
        Command::Logout => handle_logout(app)?,
        Command::Callback(args) => handle_callback(args, app).await?,
        Command::Whoami => handle_whoami(app).await?,
        Command::Open(args) => handle_open(args, app).await?,
        Command::Status => handle_status(app)?,
        Command::Config(_) => anyhow::bail!("config commands do not run against a session"),
    }

    Ok(())
}

use edunexia_core::{LoginRequest, Profile, RegisterRequest, DASHBOARD, HOME, LOGIN, REGISTER};

use crate::cli_args::*;
use crate::modules::auth::service;
use crate::modules::http::Navigator;
use crate::modules::session::SessionManager;
use crate::modules::system::{report_transitions, AppContext};
use crate::{prompt_login_command, prompt_password};

pub(crate) async fn handle_login_command(args: LoginArgs, app: &AppContext) -> anyhow::Result<()> {
    let command = match args.command {
        Some(command) => command,
        None => prompt_login_command()?,
    };

    let (api, history) = app.mount(LOGIN);
    match command {
        LoginCommand::Google => {
            println!("Open in your browser: {}", service::google_login_url(&api));
            println!("After signing in, pass the redirect address to `edunexia callback`.");
        }
        LoginCommand::Password(login) => {
            let password = match login.password {
                Some(password) => password,
                None => prompt_password("Password: ")?,
            };
            let mut session = SessionManager::bootstrap(api, None);
            session
                .login(&LoginRequest {
                    username: login.username,
                    password,
                })
                .await?;
            session.sync_profile().await;
            print_signed_in(session.user());
            history.navigate(DASHBOARD, false);
            report_transitions(&history);
        }
    }
    Ok(())
}

pub(crate) async fn handle_register(args: RegisterArgs, app: &AppContext) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ")?,
    };
    let (api, history) = app.mount(REGISTER);
    let mut session = SessionManager::bootstrap(api, None);
    session
        .register(&RegisterRequest {
            username: args.username,
            email: args.email,
            password,
            full_name: args.full_name,
        })
        .await?;
    session.sync_profile().await;
    print_signed_in(session.user());
    history.navigate(DASHBOARD, false);
    report_transitions(&history);
    Ok(())
}

pub(crate) fn handle_logout(app: &AppContext) -> anyhow::Result<()> {
    let (api, _) = app.mount(HOME);
    let mut session = SessionManager::bootstrap(api, None);
    let had_session = session.token().is_some();
    session.logout();
    if had_session {
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

fn print_signed_in(user: Option<&Profile>) {
    match user {
        Some(user) => println!("Logged in as {}", user.display_name()),
        None => println!("Logged in"),
    }
}

use edunexia_core::{path_of, query_params, Profile, LOGIN};

use crate::cli_args::OpenArgs;
use crate::modules::auth::describe_login_error;
use crate::modules::guard::RouteGuard;
use crate::modules::http::{History, Transition};
use crate::modules::session::SessionManager;
use crate::modules::system::{location_of, AppContext};

pub(crate) fn handle_status(app: &AppContext) -> anyhow::Result<()> {
    let (api, _) = app.mount(edunexia_core::HOME);
    let manager = SessionManager::bootstrap(api, None);
    let session = manager.session();
    println!("api_url: {}", app.settings.api_base);
    println!("storage: {}", app.store.describe());
    match session.token {
        Some(_) => println!("session: active"),
        None => println!("session: none"),
    }
    if let Some(user) = &session.user {
        println!("user: {} ({})", user.display_name(), user.id);
    }
    Ok(())
}

/// Opens a route the way the router would: the guard decides, and a login
/// page carrying an error code explains it.
pub(crate) async fn handle_open(args: OpenArgs, app: &AppContext) -> anyhow::Result<()> {
    let url = app.resolve_location(&args.path)?;
    let location = location_of(&url);
    let (api, history) = app.mount(&location);
    let mut session = SessionManager::bootstrap(api, Some(&url));

    if !RouteGuard::new(&session).enter(url.path(), history.as_ref()) {
        report_transitions(&history);
        return Ok(());
    }
    session.sync_profile().await;
    if history.moved() {
        report_transitions(&history);
        return Ok(());
    }

    if path_of(&location) == LOGIN {
        if let Some((_, code)) = url.query_pairs().find(|(key, _)| key == query_params::ERROR) {
            println!("{}", describe_login_error(&code));
        }
    }
    match session.user() {
        Some(user) => println!("{location} (signed in as {})", user.display_name()),
        None => println!("{location}"),
    }
    report_transitions(&history);
    Ok(())
}

pub(crate) fn report_transitions(history: &History) {
    for (transition, target) in history.transitions() {
        match transition {
            Transition::Push | Transition::Replace => println!("-> {target}"),
            Transition::Redirect => println!("=> {target}"),
            Transition::Reload => println!("reloading {target}"),
        }
    }
}

pub(crate) fn print_profile(profile: &Profile) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(profile)?);
    Ok(())
}

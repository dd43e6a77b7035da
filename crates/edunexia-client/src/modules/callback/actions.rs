use anyhow::Context;
use reqwest::Url;

use super::{AuthCallbackFlow, CallbackParams, CallbackState, CallbackTiming};
use crate::cli_args::{CallbackArgs, CallbackRecovery};
use crate::modules::http::History;
use crate::modules::session::SessionManager;
use crate::modules::system::{location_of, report_transitions, AppContext};

pub(crate) async fn handle_callback(args: CallbackArgs, app: &AppContext) -> anyhow::Result<()> {
    let url = app
        .resolve_location(&args.url)
        .context("callback location")?;
    let timing = if args.no_wait {
        CallbackTiming::immediate()
    } else {
        CallbackTiming::default()
    };

    let (flow, history) = run_page(&url, app, timing).await;
    if flow.state() == CallbackState::Success {
        return settle(&flow, &history).await;
    }

    match args.on_error {
        CallbackRecovery::Wait => settle(&flow, &history).await,
        CallbackRecovery::Login => {
            flow.back_to_login(history.as_ref());
            report_transitions(&history);
            bail_with(&flow)
        }
        CallbackRecovery::Reload => {
            flow.reload(history.as_ref());
            report_transitions(&history);
            let (flow, history) = run_page(&url, app, timing).await;
            settle(&flow, &history).await
        }
    }
}

/// Mounts the callback page and processes the redirect once.
async fn run_page(
    url: &Url,
    app: &AppContext,
    timing: CallbackTiming,
) -> (AuthCallbackFlow, std::sync::Arc<History>) {
    let (api, history) = app.mount(&location_of(url));
    let mut session = SessionManager::bootstrap(api, Some(url));
    let mut flow = AuthCallbackFlow::new(CallbackParams::from_url(url), timing);
    flow.start(&mut session).await;

    for line in flow.log().lines() {
        println!("{line}");
    }
    if let Some(user) = session.user().filter(|_| flow.state() == CallbackState::Success) {
        println!("Signed in as {}", user.display_name());
    }
    (flow, history)
}

async fn settle(flow: &AuthCallbackFlow, history: &History) -> anyhow::Result<()> {
    if let Some(pending) = flow.pending().filter(|pending| !pending.delay.is_zero()) {
        println!(
            "Redirecting to {} in {:.1}s",
            pending.target,
            pending.delay.as_secs_f32()
        );
    }
    flow.finish(history).await;
    report_transitions(history);
    if flow.state() == CallbackState::Success {
        return Ok(());
    }
    bail_with(flow)
}

fn bail_with(flow: &AuthCallbackFlow) -> anyhow::Result<()> {
    anyhow::bail!(
        "sign-in failed: {}",
        flow.error_message().unwrap_or("callback did not complete")
    )
}

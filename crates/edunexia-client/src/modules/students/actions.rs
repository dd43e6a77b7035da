use edunexia_core::DASHBOARD;

use crate::modules::guard::RouteGuard;
use crate::modules::session::SessionManager;
use crate::modules::system::{print_profile, report_transitions, AppContext};

/// Mounts the dashboard and prints the signed-in student's profile.
pub(crate) async fn handle_whoami(app: &AppContext) -> anyhow::Result<()> {
    let (api, history) = app.mount(DASHBOARD);
    let mut session = SessionManager::bootstrap(api, None);

    if !RouteGuard::new(&session).enter(DASHBOARD, history.as_ref()) {
        report_transitions(&history);
        anyhow::bail!("not signed in; run `edunexia login`");
    }

    session.sync_profile().await;
    if history.moved() {
        report_transitions(&history);
        anyhow::bail!("session is no longer valid; sign in again");
    }
    let Some(user) = session.user() else {
        anyhow::bail!("profile unavailable");
    };
    print_profile(user)
}

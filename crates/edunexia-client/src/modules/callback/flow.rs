use std::time::Duration;

use edunexia_core::{query_params, Profile, CALLBACK_FAILED_ERROR, DASHBOARD, LOGIN};
use reqwest::Url;
use tracing::{info, warn};

use super::DiagnosticLog;
use crate::modules::http::Navigator;
use crate::modules::session::SessionManager;
use crate::modules::students;

const VERIFY_FAILED: &str = "Could not verify your sign-in";
const NO_AUTH_INFO: &str = "No authentication information found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallbackState {
    Loading,
    Verifying,
    Success,
    Error,
}

/// Query parameters the OAuth backend redirects with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CallbackParams {
    pub token: Option<String>,
    pub error: Option<String>,
    pub details: Option<String>,
    pub status: Option<String>,
}

impl CallbackParams {
    pub(crate) fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_ref() {
                query_params::TOKEN => &mut params.token,
                query_params::ERROR => &mut params.error,
                query_params::DETAILS => &mut params.details,
                query_params::STATUS => &mut params.status,
                _ => continue,
            };
            slot.get_or_insert_with(|| value.to_string());
        }
        params
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CallbackTiming {
    pub success: Duration,
    pub error: Duration,
    pub missing: Duration,
}

impl Default for CallbackTiming {
    fn default() -> Self {
        Self {
            success: Duration::from_millis(1000),
            error: Duration::from_millis(5000),
            missing: Duration::from_millis(3000),
        }
    }
}

impl CallbackTiming {
    pub(crate) fn immediate() -> Self {
        Self {
            success: Duration::ZERO,
            error: Duration::ZERO,
            missing: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingNavigation {
    pub target: String,
    pub delay: Duration,
}

/// One pass of the OAuth redirect page: take the token, prove it works
/// against the profile endpoint, then send the user on.
pub(crate) struct AuthCallbackFlow {
    params: CallbackParams,
    timing: CallbackTiming,
    state: CallbackState,
    started: bool,
    error_message: Option<String>,
    pending: Option<PendingNavigation>,
    log: DiagnosticLog,
}

impl AuthCallbackFlow {
    pub(crate) fn new(params: CallbackParams, timing: CallbackTiming) -> Self {
        Self {
            params,
            timing,
            state: CallbackState::Loading,
            started: false,
            error_message: None,
            pending: None,
            log: DiagnosticLog::default(),
        }
    }

    pub(crate) fn state(&self) -> CallbackState {
        self.state
    }

    pub(crate) fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn pending(&self) -> Option<&PendingNavigation> {
        self.pending.as_ref()
    }

    pub(crate) fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Processes the redirect. Only the first call does anything; later calls
    /// return `false` without touching the session, the log or the network.
    pub(crate) async fn start(&mut self, session: &mut SessionManager) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        let params = self.params.clone();
        self.log.push(format!(
            "callback received: has_token={}, error={}, details={}, status={}",
            params.token.is_some(),
            params.error.as_deref().unwrap_or("-"),
            params.details.as_deref().unwrap_or("-"),
            params.status.as_deref().unwrap_or("-"),
        ));

        if let Some(token) = params.token.as_deref() {
            self.verify(session, token).await;
        } else if let Some(error) = params.error.as_deref() {
            let message = compose_error(error, params.details.as_deref(), params.status.as_deref());
            let target = login_with_error(error, params.details.as_deref().unwrap_or_default());
            self.fail(message, target, self.timing.error);
        } else {
            self.fail(NO_AUTH_INFO.to_string(), LOGIN.to_string(), self.timing.missing);
        }
        true
    }

    async fn verify(&mut self, session: &mut SessionManager, token: &str) {
        session.set_token_manually(token);
        self.log.push("token stored");
        self.transition(CallbackState::Verifying);
        self.log.push("verifying token against profile endpoint");

        let result = students::service::get_profile(session.api()).await;
        let outcome = match result {
            Ok(envelope) => envelope
                .into_success()
                .map_err(|message| message.unwrap_or_else(|| VERIFY_FAILED.to_string())),
            Err(err) => {
                warn!("callback verification failed: {err}");
                Err(err
                    .server_message()
                    .unwrap_or_else(|| VERIFY_FAILED.to_string()))
            }
        };

        match outcome {
            Ok(profile) => self.succeed(session, profile),
            Err(message) => {
                let target = login_with_error(CALLBACK_FAILED_ERROR, &message);
                self.fail(message, target, self.timing.error);
            }
        }
    }

    fn succeed(&mut self, session: &mut SessionManager, profile: Profile) {
        let name = profile.display_name().to_string();
        session.accept_profile(profile);
        self.transition(CallbackState::Success);
        self.log.push(format!("Welcome, {name}!"));
        info!(user = %name, "oauth sign-in verified");
        self.pending = Some(PendingNavigation {
            target: DASHBOARD.to_string(),
            delay: self.timing.success,
        });
    }

    fn fail(&mut self, message: String, target: String, delay: Duration) {
        self.log.push(format!("error: {message}"));
        self.error_message = Some(message);
        self.transition(CallbackState::Error);
        self.pending = Some(PendingNavigation { target, delay });
    }

    fn transition(&mut self, next: CallbackState) {
        self.log.push(format!("state {:?} -> {:?}", self.state, next));
        self.state = next;
    }

    /// Waits out the delay of a terminal state, then replaces the current
    /// history entry with its destination.
    pub(crate) async fn finish(&self, navigator: &dyn Navigator) {
        let Some(pending) = self.pending.as_ref() else {
            return;
        };
        if !pending.delay.is_zero() {
            tokio::time::sleep(pending.delay).await;
        }
        navigator.navigate(&pending.target, true);
    }

    pub(crate) fn back_to_login(&self, navigator: &dyn Navigator) {
        navigator.navigate(LOGIN, false);
    }

    /// Full reload, for when the failure may come from a stale client build.
    pub(crate) fn reload(&self, navigator: &dyn Navigator) {
        navigator.reload();
    }
}

fn compose_error(error: &str, details: Option<&str>, status: Option<&str>) -> String {
    let mut message = error.to_string();
    if let Some(details) = details {
        message.push_str(&format!(": {details}"));
    }
    if let Some(status) = status {
        message.push_str(&format!(" (status: {status})"));
    }
    message
}

fn login_with_error(error: &str, details: &str) -> String {
    format!(
        "{LOGIN}?error={}&details={}",
        urlencoding::encode(error),
        urlencoding::encode(details)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::http::{ApiClient, History, Transition};
    use crate::modules::storage::{MemoryStorage, TokenStore};
    use mockito::{Server, ServerGuard};
    use std::sync::Arc;

    fn session(server: &ServerGuard, location: &str) -> (SessionManager, Arc<History>) {
        let history = Arc::new(History::new(location));
        let api = ApiClient::new(
            reqwest::Client::new(),
            &format!("{}/api/v1", server.url()),
            TokenStore::new(Arc::new(MemoryStorage::default())),
            history.clone(),
        );
        let url = Url::parse(&format!("http://localhost:3000{location}")).expect("url");
        (SessionManager::bootstrap(api, Some(&url)), history)
    }

    fn flow_for(location: &str) -> AuthCallbackFlow {
        let url = Url::parse(&format!("http://localhost:3000{location}")).expect("url");
        AuthCallbackFlow::new(CallbackParams::from_url(&url), CallbackTiming::immediate())
    }

    fn states(flow: &AuthCallbackFlow) -> Vec<String> {
        flow.log()
            .lines()
            .iter()
            .filter_map(|line| line.split_once("] state ").map(|(_, rest)| rest.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn token_is_verified_then_dashboard() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/auth/student/me")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_body(r#"{"status":"success","data":{"id":3,"full_name":"Vo Mai"}}"#)
            .expect(1)
            .create_async()
            .await;
        let location = "/auth/callback?token=abc123";
        let (mut session, history) = session(&server, location);
        assert_eq!(session.store().token().as_deref(), Some("abc123"));

        let mut flow = flow_for(location);
        assert_eq!(flow.state(), CallbackState::Loading);
        assert!(flow.start(&mut session).await);

        assert_eq!(flow.state(), CallbackState::Success);
        assert_eq!(
            states(&flow),
            vec!["Loading -> Verifying", "Verifying -> Success"]
        );
        assert!(flow
            .log()
            .lines()
            .iter()
            .any(|line| line.ends_with("Welcome, Vo Mai!")));
        assert_eq!(session.token(), Some("abc123"));
        assert_eq!(session.user().map(|user| user.id.as_str()), Some("3"));
        assert!(!session.sync_profile().await);

        flow.finish(history.as_ref()).await;
        assert_eq!(
            history.transitions(),
            vec![(Transition::Replace, DASHBOARD.to_string())]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn success_waits_for_the_configured_delay() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/auth/student/me")
            .with_status(200)
            .with_body(r#"{"status":"success","data":{"id":3}}"#)
            .create_async()
            .await;
        let location = "/auth/callback?token=abc123";
        let (mut session, history) = session(&server, location);
        let url = Url::parse(&format!("http://localhost:3000{location}")).expect("url");
        let mut flow = AuthCallbackFlow::new(CallbackParams::from_url(&url), CallbackTiming::default());
        flow.start(&mut session).await;
        assert_eq!(
            flow.pending(),
            Some(&PendingNavigation {
                target: DASHBOARD.to_string(),
                delay: Duration::from_millis(1000),
            })
        );
        assert!(!history.moved());
    }

    #[tokio::test]
    async fn rejected_token_ends_in_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/auth/student/me")
            .with_status(401)
            .with_body(r#"{"detail":"Could not validate credentials"}"#)
            .create_async()
            .await;
        let location = "/auth/callback?token=stale";
        let (mut session, history) = session(&server, location);

        let mut flow = flow_for(location);
        flow.start(&mut session).await;

        assert_eq!(flow.state(), CallbackState::Error);
        assert_eq!(flow.error_message(), Some("Could not validate credentials"));
        assert_eq!(
            states(&flow),
            vec!["Loading -> Verifying", "Verifying -> Error"]
        );
        assert!(!history.moved());

        flow.finish(history.as_ref()).await;
        assert_eq!(
            history.current_location(),
            "/login?error=callback_failed&details=Could%20not%20validate%20credentials"
        );
    }

    #[tokio::test]
    async fn unsuccessful_envelope_uses_default_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/v1/auth/student/me")
            .with_status(200)
            .with_body(r#"{"status":"error"}"#)
            .create_async()
            .await;
        let location = "/auth/callback?token=abc";
        let (mut session, _) = session(&server, location);
        let mut flow = flow_for(location);
        flow.start(&mut session).await;
        assert_eq!(flow.state(), CallbackState::Error);
        assert_eq!(flow.error_message(), Some(VERIFY_FAILED));
    }

    #[tokio::test]
    async fn error_parameter_skips_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let location = "/auth/callback?error=access_denied&details=user%20cancelled&status=403";
        let (mut session, history) = session(&server, location);

        let mut flow = flow_for(location);
        flow.start(&mut session).await;

        assert_eq!(flow.state(), CallbackState::Error);
        assert_eq!(
            flow.error_message(),
            Some("access_denied: user cancelled (status: 403)")
        );
        assert_eq!(states(&flow), vec!["Loading -> Error"]);

        flow.finish(history.as_ref()).await;
        assert_eq!(
            history.current_location(),
            "/login?error=access_denied&details=user%20cancelled"
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_parameters_report_generic_error() {
        let server = Server::new_async().await;
        let location = "/auth/callback";
        let (mut session, history) = session(&server, location);

        let mut flow = flow_for(location);
        flow.start(&mut session).await;
        assert_eq!(flow.state(), CallbackState::Error);
        assert!(flow
            .error_message()
            .is_some_and(|message| message.contains("No authentication information")));
        assert_eq!(
            flow.pending().map(|pending| pending.delay),
            Some(Duration::ZERO)
        );

        flow.finish(history.as_ref()).await;
        assert_eq!(history.current_location(), LOGIN);
    }

    #[tokio::test]
    async fn second_start_is_ignored() {
        let server = Server::new_async().await;
        let location = "/auth/callback?error=access_denied";
        let (mut session, _) = session(&server, location);

        let mut flow = flow_for(location);
        assert!(flow.start(&mut session).await);
        let lines = flow.log().lines().len();
        assert!(!flow.start(&mut session).await);
        assert_eq!(flow.log().lines().len(), lines);
    }

    #[tokio::test]
    async fn recovery_actions_navigate() {
        let server = Server::new_async().await;
        let location = "/auth/callback?error=token_failed";
        let (mut session, history) = session(&server, location);
        let mut flow = flow_for(location);
        flow.start(&mut session).await;

        flow.reload(history.as_ref());
        assert_eq!(history.current_location(), location);
        flow.back_to_login(history.as_ref());
        assert_eq!(history.current_location(), LOGIN);
        assert_eq!(
            history.transitions(),
            vec![
                (Transition::Reload, location.to_string()),
                (Transition::Push, LOGIN.to_string()),
            ]
        );
    }

    #[test]
    fn params_ignore_blank_values() {
        let url = Url::parse("http://localhost/auth/callback?token=&error=x&error=y&details=%20")
            .expect("url");
        let params = CallbackParams::from_url(&url);
        assert_eq!(
            params,
            CallbackParams {
                token: None,
                error: Some("x".to_string()),
                details: None,
                status: None,
            }
        );
    }
}

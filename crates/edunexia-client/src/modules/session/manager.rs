use edunexia_core::{query_params, AuthData, LoginRequest, Profile, RegisterRequest};
use reqwest::Url;
use tracing::{debug, info, warn};

use super::SessionError;
use crate::modules::auth::service;
use crate::modules::http::{ApiClient, ApiError};
use crate::modules::storage::TokenStore;
use crate::modules::students;

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";

/// Snapshot of the client-side authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Session {
    pub token: Option<String>,
    pub user: Option<Profile>,
    pub loading: bool,
}

/// Owns the in-memory session and keeps storage in step with it.
///
/// Every mutation goes through one of the methods below; storage is written
/// before the in-memory state changes.
pub(crate) struct SessionManager {
    api: ApiClient,
    session: Session,
    profile_synced_for: Option<String>,
}

impl SessionManager {
    /// Reads the token from the location first, then from storage.
    /// A token found in the location is persisted right away, and a profile
    /// cached for a different token is dropped.
    pub(crate) fn bootstrap(api: ApiClient, location: Option<&Url>) -> Self {
        let store = api.store();
        let url_token = location.and_then(|url| {
            url.query_pairs()
                .find(|(key, value)| key == query_params::TOKEN && !value.trim().is_empty())
                .map(|(_, value)| value.into_owned())
        });
        let token = match url_token {
            Some(token) => {
                debug!("session token taken from redirect location");
                if store.token().as_deref() != Some(token.as_str()) {
                    store.clear_profile();
                }
                api.set_token(&token);
                Some(token)
            }
            None => store.token(),
        };
        let user = token.as_ref().and_then(|_| store.cached_profile());

        Self {
            api,
            session: Session {
                token,
                user,
                loading: false,
            },
            profile_synced_for: None,
        }
    }

    pub(crate) fn api(&self) -> &ApiClient {
        &self.api
    }

    pub(crate) fn store(&self) -> &TokenStore {
        self.api.store()
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.session.token.as_deref()
    }

    pub(crate) fn user(&self) -> Option<&Profile> {
        self.session.user.as_ref()
    }

    /// `login` and `register` raise the flag only while they hold `&mut self`,
    /// so outside callers always read it lowered.
    #[cfg(test)]
    pub(crate) fn is_loading(&self) -> bool {
        self.session.loading
    }

    /// Fetches the profile once per token while the user is unknown.
    ///
    /// Returns whether a fetch was issued. Failures are logged and leave the
    /// session untouched; invalidation only happens through a 401.
    pub(crate) async fn sync_profile(&mut self) -> bool {
        let Some(token) = self.session.token.clone() else {
            return false;
        };
        let already_synced = self.profile_synced_for.as_deref() == Some(token.as_str());
        if self.session.user.is_some() || already_synced {
            return false;
        }
        self.profile_synced_for = Some(token.clone());

        match students::service::get_profile(&self.api).await {
            Ok(envelope) => match envelope.into_success() {
                Ok(profile) => {
                    if self.session.token.as_deref() == Some(token.as_str()) {
                        self.accept_profile(profile);
                    }
                }
                Err(message) => {
                    warn!(
                        server_message = message.as_deref().unwrap_or_default(),
                        "profile fetch returned no profile"
                    );
                }
            },
            Err(err) => {
                warn!("failed to fetch profile: {err}");
                if err.signed_out() {
                    self.reset();
                }
            }
        }
        true
    }

    pub(crate) async fn login(&mut self, credentials: &LoginRequest) -> Result<(), SessionError> {
        self.session.loading = true;
        let result = service::login(&self.api, credentials).await;
        self.session.loading = false;
        self.finish_authentication(result, LOGIN_FAILED)
    }

    pub(crate) async fn register(&mut self, data: &RegisterRequest) -> Result<(), SessionError> {
        self.session.loading = true;
        let result = service::register(&self.api, data).await;
        self.session.loading = false;
        self.finish_authentication(result, REGISTER_FAILED)
    }

    /// Adopts a token without a user record; the profile follows through
    /// `sync_profile`.
    pub(crate) fn set_token_manually(&mut self, token: &str) {
        self.api.set_token(token);
        if self.session.token.as_deref() != Some(token) {
            self.session.user = None;
            self.store().clear_profile();
        }
        self.session.token = Some(token.to_string());
    }

    pub(crate) fn accept_profile(&mut self, profile: Profile) {
        if self.session.token.is_none() {
            warn!("ignoring profile without a session token");
            return;
        }
        self.store().cache_profile(&profile);
        self.profile_synced_for = self.session.token.clone();
        self.session.user = Some(profile);
    }

    pub(crate) fn logout(&mut self) {
        self.reset();
        info!("signed out");
    }

    /// Empties storage and the in-memory session.
    fn reset(&mut self) {
        self.api.clear_token();
        self.store().clear_profile();
        self.session.token = None;
        self.session.user = None;
        self.profile_synced_for = None;
    }

    fn finish_authentication(
        &mut self,
        result: Result<edunexia_core::ApiEnvelope<AuthData>, ApiError>,
        default_message: &str,
    ) -> Result<(), SessionError> {
        let envelope = match result {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!("authentication request failed: {err}");
                if err.signed_out() {
                    self.reset();
                }
                return Err(SessionError::AuthFailed {
                    message: err
                        .server_message()
                        .unwrap_or_else(|| default_message.to_string()),
                });
            }
        };
        let data = envelope
            .into_success()
            .map_err(|message| SessionError::AuthFailed {
                message: message.unwrap_or_else(|| default_message.to_string()),
            })?;
        self.commit(data);
        Ok(())
    }

    fn commit(&mut self, data: AuthData) {
        let AuthData {
            access_token, user, ..
        } = data;
        self.store().set_token(&access_token);
        match &user {
            Some(profile) => self.store().cache_profile(profile),
            None => self.store().clear_profile(),
        }
        self.profile_synced_for = user.as_ref().map(|_| access_token.clone());
        self.session.token = Some(access_token);
        self.session.user = user;
        info!(
            user = self.user().map(Profile::display_name).unwrap_or("-"),
            "session established"
        );
    }
}

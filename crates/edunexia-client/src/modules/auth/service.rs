use edunexia_core::{
    ApiEnvelope, AuthData, LoginRequest, RegisterRequest, GOOGLE_LOGIN_ENDPOINT, LOGIN_ENDPOINT,
    REGISTER_ENDPOINT,
};

use crate::modules::http::{ApiClient, ApiError};

pub(crate) async fn login(
    api: &ApiClient,
    credentials: &LoginRequest,
) -> Result<ApiEnvelope<AuthData>, ApiError> {
    api.post_json(LOGIN_ENDPOINT, credentials).await
}

pub(crate) async fn register(
    api: &ApiClient,
    data: &RegisterRequest,
) -> Result<ApiEnvelope<AuthData>, ApiError> {
    api.post_json(REGISTER_ENDPOINT, data).await
}

/// Entry point of the Google sign-in redirect chain. The backend answers
/// with a redirect to `/auth/callback?token=...` or `/login?error=...`.
pub(crate) fn google_login_url(api: &ApiClient) -> String {
    api.url(GOOGLE_LOGIN_ENDPOINT)
}

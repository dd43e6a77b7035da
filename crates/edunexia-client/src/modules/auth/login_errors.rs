use edunexia_core::UNAUTHORIZED_ERROR;

/// Text shown on the login page for an `error` code from a redirect.
pub(crate) fn describe_login_error(code: &str) -> &'static str {
    match code {
        "callback_failed" => "Account synchronization failed. Please try again.",
        "access_denied" => "Google sign-in was cancelled.",
        "token_failed" | "token_exchange_failed" | "no_access_token" => {
            "Could not obtain an authorization code from Google."
        }
        "user_info_failed" | "userinfo_failed" => "Could not read your Google profile.",
        "email_missing" | "no_email" => "Your Google account has no email address.",
        UNAUTHORIZED_ERROR => "Your session has expired. Please sign in again.",
        _ => "Something went wrong while signing in.",
    }
}

/// Persistent storage keys shared by every client build.
pub mod storage_keys {
    pub const TOKEN: &str = "edunexia_token";
    pub const USER: &str = "edunexia_user";
}

/// Query parameters read from redirect locations.
pub mod query_params {
    pub const TOKEN: &str = "token";
    pub const ERROR: &str = "error";
    pub const DETAILS: &str = "details";
    pub const STATUS: &str = "status";
}

pub const DEFAULT_API_PATH: &str = "/api/v1";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub const LOGIN_ENDPOINT: &str = "auth/student/login";
pub const REGISTER_ENDPOINT: &str = "auth/student/register";
pub const PROFILE_ENDPOINT: &str = "auth/student/me";
pub const GOOGLE_LOGIN_ENDPOINT: &str = "auth/google/login";

pub const UNAUTHORIZED_ERROR: &str = "unauthorized";
pub const SESSION_EXPIRED_DETAIL: &str = "session_expired";
pub const CALLBACK_FAILED_ERROR: &str = "callback_failed";

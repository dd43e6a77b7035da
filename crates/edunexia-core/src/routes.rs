pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const CALLBACK: &str = "/auth/callback";

pub const DASHBOARD: &str = "/dashboard";
pub const PRACTICE_SETUP: &str = "/practice/setup";
pub const PRACTICE_TEST: &str = "/practice/:testId";
pub const PRACTICE_OFFLINE: &str = "/practice/:testId/offline";
pub const RESULT: &str = "/results/:submissionId";
pub const SUGGESTIONS: &str = "/results/:submissionId/suggestions";

pub const PROTECTED_ROUTES: [&str; 6] = [
    DASHBOARD,
    PRACTICE_SETUP,
    PRACTICE_TEST,
    PRACTICE_OFFLINE,
    RESULT,
    SUGGESTIONS,
];

/// Strips the query string and fragment from a location.
pub fn path_of(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}

/// Pages where a 401 must not trigger another redirect to login.
pub fn is_auth_page(path: &str) -> bool {
    let path = path_of(path);
    path.contains(LOGIN) || path.contains(CALLBACK)
}

pub fn is_protected(path: &str) -> bool {
    let path = path_of(path);
    PROTECTED_ROUTES
        .iter()
        .any(|pattern| route_matches(pattern, path))
}

/// Matches a concrete path against a pattern whose `:name` segments match
/// any single non-empty segment.
pub fn route_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.trim_end_matches('/').split('/');
    let mut path_segments = path.trim_end_matches('/').split('/');
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                if expected.starts_with(':') {
                    if actual.is_empty() {
                        return false;
                    }
                } else if expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

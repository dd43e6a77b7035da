pub(crate) mod auth;
pub(crate) mod callback;
pub(crate) mod guard;
pub(crate) mod http;
pub(crate) mod session;
pub(crate) mod storage;
pub(crate) mod students;
pub(crate) mod system;

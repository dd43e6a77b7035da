mod manager;

pub(crate) use manager::SessionManager;

#[derive(Debug, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("{message}")]
    AuthFailed { message: String },
}

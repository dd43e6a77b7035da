pub mod auth;
pub mod envelope;

pub use auth::*;
pub use envelope::*;

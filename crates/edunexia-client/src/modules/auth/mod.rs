mod actions;
pub(crate) mod args;
mod login_errors;
pub(crate) mod service;

pub(crate) use actions::{handle_login_command, handle_logout, handle_register};
pub(crate) use login_errors::describe_login_error;

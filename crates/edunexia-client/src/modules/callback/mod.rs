mod actions;
pub(crate) mod args;
mod flow;
mod log;

pub(crate) use actions::handle_callback;
pub(crate) use flow::{AuthCallbackFlow, CallbackParams, CallbackState, CallbackTiming};
pub(crate) use log::DiagnosticLog;

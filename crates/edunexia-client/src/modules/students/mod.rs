mod actions;
pub(crate) mod service;

pub(crate) use actions::handle_whoami;

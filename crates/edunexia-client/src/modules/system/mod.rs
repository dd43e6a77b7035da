mod actions;
pub(crate) mod args;
pub(crate) mod config;
pub(crate) mod types;

pub(crate) use actions::{handle_open, handle_status, print_profile, report_transitions};
pub(crate) use config::{data_dir, handle_config_command, load_config, resolve_settings, save_config};
pub(crate) use types::{location_of, AppContext};

mod client;
mod errors;
mod navigator;

pub(crate) use client::ApiClient;
pub(crate) use errors::ApiError;
pub(crate) use navigator::{History, Navigator, Transition};

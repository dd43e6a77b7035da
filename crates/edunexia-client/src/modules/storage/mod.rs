mod backends;
mod token_store;

#[cfg(test)]
pub(crate) use backends::MemoryStorage;
pub(crate) use backends::{open_backend, StorageBackend, StorageKind};
pub(crate) use token_store::TokenStore;

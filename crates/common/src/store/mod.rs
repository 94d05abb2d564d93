mod memory;
mod provider;

pub use memory::{MemorySecretStore, MemorySecretStoreError};
pub use provider::{SecretStore, SecretStoreError};

mod client;
mod error;

pub use client::{VaultClient, TOKEN_HEADER};
pub use error::VaultError;

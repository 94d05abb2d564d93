/**
 * Secret data model.
 *  - Secret values and their tagged field values
 *  - Path joining and directory/leaf classification
 */
pub mod secret;
/**
 * The capability interface every secret backend
 *  implements, plus an in-memory backend used for
 *  tests and dry runs.
 */
pub mod store;
/**
 * Recursive traversal of a store's namespace and
 *  the copy / delete / probe operations built on it.
 */
pub mod migrate;
/**
 * Irreversible, shape-preserving replacement of
 *  secret values.
 */
pub mod scramble;

pub mod prelude {
    pub use crate::migrate::{MigrateError, MigrationContext, Migrator, Operation};
    pub use crate::scramble::{Scrambler, COMPLEX_VALUE_PLACEHOLDER};
    pub use crate::secret::{Entry, FieldValue, SecretValue};
    pub use crate::store::{MemorySecretStore, SecretStore, SecretStoreError};
}

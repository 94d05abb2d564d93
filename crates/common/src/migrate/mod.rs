mod engine;
mod error;
mod walker;

pub use engine::{ItemCounter, MigrationContext, Migrator, Operation};
pub use error::MigrateError;
pub use walker::{list_children, walk, LeafPaths, LeafVisitor};

pub mod path;
mod value;

pub use path::{join, normalize, Entry, SEPARATOR};
pub use value::{FieldValue, SecretValue};

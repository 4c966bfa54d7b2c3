//! Published JSON Schema of the canonical workflow manifest form.

pub mod embedded;
pub mod registry;
pub mod validate;
pub mod versions;

pub use embedded::EmbeddedSchema;
pub use registry::{get_json_schema, known_schema_ids};
pub use validate::validate_schema_instance;

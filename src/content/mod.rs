//! Content module - front-matter, the post schema and post collections

mod collection;
pub mod error;
mod frontmatter;
pub mod loader;
mod post;
mod schema;

pub use collection::{sort_by_date, validate_uniqueness, PostCollection};
pub use error::{DocumentError, DuplicateSlugError, Field, FrontMatterError, Kind, ValidationError};
pub use frontmatter::{FrontMatter, RawMetadata};
pub use post::{Document, PostRecord};
pub use schema::PostSchema;

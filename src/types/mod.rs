// ABOUTME: Validated domain types for image references.
// ABOUTME: Repositories and tags are checked once at configuration time.

mod repository;
mod tag;

pub use repository::{Repository, RepositoryError};
pub use tag::{DEFAULT_TAG, Tag, TagError};

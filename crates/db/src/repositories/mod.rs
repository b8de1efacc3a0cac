//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument. Multi-statement operations run in
//! a single transaction; helpers shared across repositories take the open
//! connection instead of the pool.

pub mod comment_repo;
pub mod status_repo;
pub mod tree_repo;

pub use comment_repo::CommentRepo;
pub use status_repo::StatusRepo;
pub use tree_repo::TreeRepo;

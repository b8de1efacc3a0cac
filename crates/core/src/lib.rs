//! Domain types, validation rules and status resolution shared by the
//! storage and HTTP crates.

pub mod comments;
pub mod error;
pub mod status;
pub mod trees;
pub mod types;

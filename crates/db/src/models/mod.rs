//! Row models and input DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - A `Deserialize` create DTO whose required fields are `Option` so a missing
//!   field is reported by name instead of as a parse failure
//! - The validated insert struct produced by the DTO's `validate()`

pub mod comment;
pub mod status;
pub mod tree;

pub mod comments;
pub mod trees;

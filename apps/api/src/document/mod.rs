// Document model: the read-only tree derived from a session's stores, plus the
// preview endpoints that expose it.

pub mod builder;
pub mod handlers;
pub mod tree;

pub use builder::build_document;
pub use tree::DocumentTree;

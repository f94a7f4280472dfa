// Stores: the Field Store and Ordered Section Stores that make up a resume session,
// the in-memory session registry, and the editing endpoints.

pub mod field_store;
pub mod handlers;
pub mod section_store;
pub mod session;

pub use section_store::SectionError;
pub use session::{ResumeSession, SessionRegistry};

//! Project discovery: group traversal and cross-root deduplication.

pub mod registry;
pub mod traverser;

pub use registry::ProjectRegistry;
pub use traverser::{GroupTraverser, Traversal};

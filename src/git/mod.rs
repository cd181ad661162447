pub mod operations;
pub mod status;
pub mod tool;

// Re-export commonly used items
pub use operations::*;
pub use status::*;
pub use tool::*;

//! Synchronization status enumeration and utilities

/// Status enum representing the result of synchronizing one project
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Project was absent locally and has been cloned
    Cloned,
    /// Existing working copy was pulled
    Updated,
    /// Clone or update failed, or the destination was refused
    Error,
}

impl Status {
    /// Returns the emoji symbol for this status
    pub fn symbol(&self) -> &str {
        match self {
            Status::Cloned | Status::Updated => "🟢",
            Status::Error => "🔴",
        }
    }

    /// Returns the text representation of this status
    pub fn text(&self) -> &str {
        match self {
            Status::Cloned => "cloned",
            Status::Updated => "updated",
            Status::Error => "failed",
        }
    }
}

//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod git;

pub use self::fixtures::{project, CollectingSink, FakeGroupSource, RecordingVcs};
pub use self::git::{create_bare_origin, is_git_available, setup_git_repo};

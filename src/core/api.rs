//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Diagnostics reporting
//! - Statistics tracking
//! - Settings resolution
//! - Configuration utilities
//!
//! Internal implementation details are not exposed through this API.

// Core types
pub use super::diagnostics::{Diagnostic, DiagnosticSink};
pub use super::stats::SyncStatistics;

// Settings
pub use super::settings::{CliArgs, FileConfig, SyncSettings};

// Configuration
pub use super::config::{get_sync_concurrency, PAGE_SIZE, SYNC_CONCURRENT_CAP};
pub use super::config::{ENV_GITLAB_TOKEN, ENV_GITLAB_URL, GIT_METADATA_MARKER};

// Terminal utilities (re-exported from utils)
pub use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

// Internal helpers for command modules
pub(crate) use super::progress::create_progress_bar;

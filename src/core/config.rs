//! Configuration constants and settings

// GitLab API
pub const PAGE_SIZE: usize = 100; // Always sent explicitly as per_page
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

// Working copy detection
pub const GIT_METADATA_MARKER: &str = ".git";

// Synchronization Concurrency
//
// Traversal always runs on a single task. Only clone/pull work may be spread
// over a bounded pool, and only when asked for with --jobs.

// Upper bound for the automatic --jobs 0 setting, keeps the forge from
// throttling parallel clones
pub const SYNC_CONCURRENT_CAP: usize = 12;

/// Determines how many projects are synchronized at once
///
/// Priority order:
/// 1. no --jobs flag → 1 (sequential)
/// 2. --jobs 0 → min(CPU_CORES + 2, 12)
/// 3. --jobs N → N
pub fn get_sync_concurrency(jobs: Option<usize>) -> usize {
    match jobs {
        None => 1,
        Some(0) => (num_cpus::get() + 2).min(SYNC_CONCURRENT_CAP),
        Some(n) => n,
    }
}

// Config file location under the platform config directory
pub const CONFIG_DIR_NAME: &str = "group-sync";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// Environment variables read by the CLI
pub const ENV_GITLAB_URL: &str = "GITLAB_URL";
pub const ENV_GITLAB_TOKEN: &str = "GITLAB_TOKEN";

// Progress bar configuration
pub const PROGRESS_CHARS: &str = "##-";
pub const PROGRESS_TEMPLATE: &str = "{prefix:.bold} [{bar:30}] {pos}/{len} {wide_msg}";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 30;
pub const ERROR_MESSAGE_MAX_LENGTH: usize = 60;
pub const ERROR_MESSAGE_TRUNCATE_LENGTH: usize = 57;

// Pre-allocation hint for project collections
pub const ESTIMATED_PROJECT_COUNT: usize = 64;

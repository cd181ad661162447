pub mod sync;

pub use sync::{discover_projects, handle_sync_command, run_sync, Discovery, RunOptions, RunSummary};

//! Command-line facing workflow, kept free of clap so it can be driven
//! programmatically.

pub mod orchestration;

pub use orchestration::{run_sync_workflow, SyncMode, SyncReport, SyncWorkflowArgs};

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod output;
pub mod plan;
pub mod store;
pub mod substituter;
pub mod ui;
pub mod warnings;

pub use error::{Result, SyncError};

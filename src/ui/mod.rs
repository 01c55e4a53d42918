//! User interface module - operator-facing output.
//!
//! The tool runs unattended in CI, so there are no prompts; everything here
//! is formatting.

pub mod formatter;

pub use formatter::{
    display_drift, display_error, display_export, display_file_result, display_plan,
    display_status, display_success, display_value, display_warning,
};

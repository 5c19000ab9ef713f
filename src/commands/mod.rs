//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod hf;
pub mod models;
pub mod utils;
pub mod w_efficiency;

// Re-export main command functions
pub use hf::execute_hf;
pub use models::{HfArgs, WEfficiencyArgs};
pub use utils::{display_schema, display_version, validate_summary_file};
pub use w_efficiency::execute_w_efficiency;

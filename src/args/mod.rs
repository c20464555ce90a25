//! Command-line argument parsing and handling.

pub mod bundle;
pub mod definition;
pub mod locale;
pub mod site;
pub mod translate;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, BundleFormat, Command, run};
pub use utils::determine_log_level;

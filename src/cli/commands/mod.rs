//! CLI command implementations

pub mod completions;
pub mod config;
pub mod resolve;
pub mod status;

pub use completions::execute as completions;
pub use config::execute as config;
pub use resolve::execute as resolve;
pub use status::execute as status;

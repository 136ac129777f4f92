pub mod branch_naming;
pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod git_ops;
pub mod host;
pub mod suggest;
pub mod template;

pub use branch_naming::BranchParts;
pub use config::MessageConfig;
pub use error::{CommitFmtError, Result};
pub use template::{fill, generate_message, is_compatible};

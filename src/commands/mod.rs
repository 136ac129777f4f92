pub mod check;
pub mod config_cmd;
pub mod format;
pub mod hook;
pub mod init;
pub mod install;
pub mod parse;
pub mod suggest;
pub mod watch;

use std::io::Read;
use std::path::Path;

use crate::error::CommitFmtError;
use crate::git_ops::GitHost;
use crate::host::MessageHost;

/// Branch to format for: the explicit one, else the checked-out branch
///
/// Outside a repository there is no branch.
pub fn resolve_branch(explicit: Option<String>) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if explicit.is_some() {
        return Ok(explicit);
    }

    match GitHost::discover(Path::new("."), None) {
        Ok(host) => Ok(host.current_branch_name()?),
        Err(CommitFmtError::NotARepository) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read a message file, or stdin when no file is given
pub fn read_message(file: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut message = String::new();
            std::io::stdin().read_to_string(&mut message)?;
            Ok(message)
        }
    }
}

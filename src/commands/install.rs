use std::path::Path;

use crate::git_ops;

pub fn handle_install(force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let hook_path = git_ops::install_hook(Path::new("."), force)?;
    println!("Installed prepare-commit-msg hook at {}", hook_path.display());
    Ok(())
}

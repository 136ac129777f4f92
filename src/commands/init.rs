use std::path::Path;

use crate::config;
use crate::git_ops::{self, GitHost};

pub fn handle_init() -> Result<(), Box<dyn std::error::Error>> {
    match run_init() {
        Ok(()) => {
            // Initialization completed successfully
        }
        Err(e) => {
            eprintln!("Error during initialization: {}", e);
        }
    }
    Ok(())
}

fn run_init() -> Result<(), Box<dyn std::error::Error>> {
    let host = GitHost::discover(Path::new("."), None)?;
    let answers = config::interactive_init(host.repo_dir())?;

    if answers.install_hook {
        let hook_path = git_ops::install_hook(host.repo_dir(), false)?;
        println!("Hook installed at {}", hook_path.display());
    }

    println!("\ncommitfmt configuration complete!");
    println!("\nYour settings have been saved to this repository's git config.");
    println!("You can view them with: commitfmt config");
    println!("You can modify them with: git config commitfmt.<setting> <value>");

    println!("\nQuick start:");
    println!("  commitfmt parse                    # See how your branch is split");
    println!("  echo \"Fix it\" | commitfmt format   # Preview a formatted message");
    println!("  git commit                         # The hook formats the message");

    Ok(())
}

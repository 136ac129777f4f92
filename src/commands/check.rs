use std::path::Path;

use crate::cli::TemplateArgs;
use crate::commands::{read_message, resolve_branch};
use crate::config::GitConfigSource;
use crate::driver::MessageDriver;
use crate::git_ops::split_comment_block;
use crate::host::MemoryHost;

pub fn handle_check(
    file: Option<&Path>,
    branch: Option<String>,
    template: &TemplateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_message(file)?;
    let (body, _) = split_comment_block(&content);
    let branch = resolve_branch(branch)?;

    let driver = MessageDriver::new(
        MemoryHost::new(branch.as_deref(), body),
        GitConfigSource::new(".", template.overrides()),
    );

    match driver.check_message()? {
        None => println!("No branch checked out, nothing to check"),
        Some(true) => println!("Message matches the template"),
        Some(false) => {
            println!("Message does not match the template");
            std::process::exit(1);
        }
    }

    Ok(())
}

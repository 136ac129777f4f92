use crate::branch_naming::BranchParts;
use crate::commands::resolve_branch;
use crate::config::{ConfigOverrides, ConfigSource, GitConfigSource};

pub fn handle_parse(branch: Option<String>, separator: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let branch = resolve_branch(branch)?.ok_or("No branch checked out. Pass a branch name to parse.")?;
    let overrides = ConfigOverrides {
        template: None,
        separator,
    };
    let config = GitConfigSource::new(".", overrides).load()?;

    for (i, part) in BranchParts::parse(&branch, &config.separator).iter().enumerate() {
        println!("b{}\t{}", i + 1, part);
    }

    Ok(())
}

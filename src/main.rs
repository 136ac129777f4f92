use clap::Parser;

use commitfmt::cli::{Cli, Commands};
use commitfmt::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Watch { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Format { file, branch, template } => {
            commands::format::handle_format(file.as_deref(), branch.clone(), template)
        }
        Commands::Check { file, branch, template } => {
            commands::check::handle_check(file.as_deref(), branch.clone(), template)
        }
        Commands::Parse { branch, separator } => commands::parse::handle_parse(branch.clone(), separator.clone()),
        Commands::Hook { message_file, source, .. } => {
            commands::hook::handle_hook(message_file, source.as_deref())
        }
        Commands::Install { force } => commands::install::handle_install(*force),
        Commands::Suggest { file, branch, command, timeout_ms, template } => {
            commands::suggest::handle_suggest(file.as_deref(), branch.clone(), command.clone(), *timeout_ms, template)
                .await
        }
        Commands::Watch { file, debounce_ms, poll_ms, template } => {
            commands::watch::handle_watch(file.clone(), *debounce_ms, *poll_ms, template).await
        }
        Commands::Init => commands::init::handle_init(),
        Commands::Config { json } => commands::config_cmd::handle_config(*json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

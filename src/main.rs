mod cli;
mod config;
mod kaiten;
mod model;
mod shaping;
mod tools;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cli::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (tool, arguments) = match cli::parse_args(&args)? {
        Command::Help => {
            cli::print_help();
            return Ok(());
        }
        Command::ListTools => {
            cli::print_tools();
            return Ok(());
        }
        Command::Run { tool, arguments } => (tool, arguments),
    };

    // Load config; missing credentials stop the process here
    let config = config::load_config()?;
    init_tracing(config.log_level.as_deref().unwrap_or("info"));
    let client_config = config.client_config(|key| std::env::var(key).ok())?;

    let failed = cli::handle_run(&client_config, &tool, arguments).await?;
    if failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only tool output.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::kaiten::client::KaitenClient;
use crate::tools::{TaskTools, TOOLS};

#[derive(Debug, PartialEq)]
pub enum Command {
    Help,
    ListTools,
    Run { tool: String, arguments: Value },
}

/// Parse the process arguments (without the program name).
///
/// Supported forms:
///   kaiten tools
///   kaiten get-task-details '{"card_id": 12345}'
///   kaiten get-task-status '{"card_ids": [1, 2]}'
///   kaiten help
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match first.as_str() {
        "help" | "-h" | "--help" => Ok(Command::Help),
        "tools" => Ok(Command::ListTools),
        name if TOOLS.iter().any(|t| t.name == name) => {
            let raw = rest.join(" ");
            let arguments = if raw.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&raw)
                    .with_context(|| format!("Arguments for {name} are not valid JSON"))?
            };
            if !arguments.is_object() {
                bail!("Arguments for {name} must be a JSON object");
            }
            Ok(Command::Run {
                tool: name.to_string(),
                arguments,
            })
        }
        other => bail!("Unknown command: {other}\n\nRun `kaiten help` for usage."),
    }
}

/// Run one tool against the configured Kaiten instance. Returns whether the
/// tool reported an error.
pub async fn handle_run(
    client_config: &ClientConfig,
    tool: &str,
    arguments: Value,
) -> Result<bool> {
    let client = KaitenClient::new(client_config)?;
    let tools = TaskTools::new(Box::new(client));

    let result = tools.call(tool, arguments).await;
    if result.is_error {
        eprintln!("{}", result.message());
    } else {
        println!("{}", result.message());
    }
    Ok(result.is_error)
}

pub fn print_tools() {
    for tool in TOOLS {
        println!("{} — {}", tool.name, tool.title);
        println!("  {}", tool.description);
        println!();
    }
}

pub fn print_help() {
    println!("kaiten — typed access to Kaiten cards, comments and time logs\n");
    println!("USAGE:");
    println!("  kaiten tools                 List available tools");
    println!("  kaiten <tool> [json-args]    Run a tool; arguments default to {{}}");
    println!();
    println!("CONFIGURATION:");
    println!("  KAITEN_BASE_URL   e.g. https://mycompany.kaiten.ru/api/latest");
    println!("  KAITEN_API_TOKEN  API token");
    println!("  Both may also be set in ~/.kaiten/config.toml (base_url, token).");
    println!();
    println!("EXAMPLES:");
    println!("  kaiten get-task-details '{{\"card_id\": 12345, \"comments_limit\": 5}}'");
    println!("  kaiten get-time-logs '{{\"card_id\": 12345, \"group_by\": \"user\"}}'");
    println!("  kaiten update-task '{{\"card_id\": 12345, \"title\": \"New title\"}}'");
}

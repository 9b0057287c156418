//! Shared validation and dispatch utilities for larderctl command handlers.

use crate::cli_utils;

/// Validates both minimum and maximum argument counts.
///
/// # Arguments
/// * `args` - The command arguments array (including the subcommand)
/// * `min_count` - The minimum number of arguments required
/// * `max_count` - The maximum number of arguments allowed
/// * `command` - The command name for error message
/// * `usage` - The usage string to display
pub fn validate_args_count_or_exit(
    args: &[String],
    min_count: usize,
    max_count: usize,
    command: &str,
    usage: &str,
) {
    if args.len() < min_count {
        cli_utils::exit_with_usage_error(
            &format!("{} command requires more arguments", command),
            usage,
        );
    }
    if args.len() > max_count {
        cli_utils::exit_with_usage_error(
            &format!("{} command has too many arguments", command),
            usage,
        );
    }
}

/// Reads a candidate document from an argument: a path to a JSON file, or
/// inline JSON when the argument starts with `{`.
pub fn read_candidate_or_exit(arg: &str) -> serde_json::Value {
    let contents = if arg.trim_start().starts_with('{') {
        arg.to_string()
    } else {
        match std::fs::read_to_string(arg) {
            Ok(contents) => contents,
            Err(e) => cli_utils::exit_with_error(&format!("Failed to read {}: {}", arg, e)),
        }
    };
    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => cli_utils::exit_with_error(&format!("Invalid candidate JSON: {}", e)),
    }
}

/// Macro to generate command dispatcher boilerplate.
macro_rules! dispatch_command {
    ($command_name:expr, $usage:expr, $args:expr, $client:expr, {
        $($subcommand:expr => $handler:expr),* $(,)?
    }) => {
        if $args.is_empty() {
            crate::cli_utils::exit_with_usage_error(
                &format!("{} command requires a subcommand", $command_name),
                $usage,
            );
        }

        match $args[0].as_str() {
            $(
                $subcommand => $handler($args, $client).await,
            )*
            _ => {
                let available_subcommands = vec![$($subcommand),*];
                crate::cli_utils::exit_with_error(&format!(
                    "Unknown {} subcommand '{}'. Available subcommands: {}",
                    $command_name,
                    $args[0],
                    available_subcommands.join(", ")
                ));
            }
        }
    };
}

pub(crate) use dispatch_command;

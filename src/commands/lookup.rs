//! # Lookup Command Handler
//!
//! Queries the Open Food Facts product database directly (not through the
//! larder daemon) and prints the recovered fields as JSON, ready to be
//! merged into an `ingredient add` candidate.

use crate::commands::shared::validate_args_count_or_exit;
use crate::lookup::OpenFoodFactsClient;
use crate::cli_utils;

/// Handles the `lookup <code>` command.
pub async fn handle_lookup_command(args: &[String]) {
    validate_args_count_or_exit(args, 1, 1, "lookup", "Usage: larderctl lookup <product-code>");

    let client = OpenFoodFactsClient::new();
    match client.lookup(&args[0]).await {
        Ok(Some(info)) => cli_utils::print_json_or_exit(&info, "product info"),
        Ok(None) => println!("No data found for product code {}", args[0]),
        Err(e) => cli_utils::exit_with_error(&format!("Lookup failed: {}", e)),
    }
}

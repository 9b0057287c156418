use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use larder::{
    cli_utils,
    commands::{handle_ingredient_command, handle_lookup_command},
    http_utils,
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of the larder API server")]
    base_url: String,
    #[arrrg(optional, "Admin token for update/delete commands")]
    admin_token: Option<String>,
}

const USAGE: &str = r#"Usage: larderctl [options] <command> [args...]

Options:
  --base-url <url>      Base URL of the larder API server (default: http://localhost:8080)
  --admin-token <tok>   Admin token for update/delete commands

Commands:
  ingredient add <candidate.json|'{...}'>      Add an ingredient from a candidate document
  ingredient list                              List all ingredients
  ingredient get <id>                          Get an ingredient by id
  ingredient search <query>                    Search names and categories
  ingredient suggest <field-path>              List distinct values (e.g. size.unit)
  ingredient update <id> <candidate.json>      Replace an ingredient (admin)
  ingredient delete <id>                       Delete an ingredient (admin)
  lookup <product-code>                        Query the product database for pre-fill data"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line_relaxed("USAGE: larderctl <command> [args...]");

    if free.is_empty() {
        cli_utils::exit_with_usage_error("No command specified", USAGE);
    }

    let base_url = if options.base_url.is_empty() {
        "http://localhost:8080".to_string()
    } else {
        options.base_url
    };

    let client = http_utils::LarderClient::new(base_url, options.admin_token);

    match free[0].as_str() {
        "ingredient" => {
            handle_ingredient_command(&free[1..], &client).await;
        }
        "lookup" => {
            handle_lookup_command(&free[1..]).await;
        }
        _ => {
            cli_utils::exit_with_error(&format!(
                "Unknown command '{}'. Available commands: ingredient, lookup",
                free[0]
            ));
        }
    }

    Ok(())
}

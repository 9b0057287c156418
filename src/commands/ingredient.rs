//! # Ingredient Command Handler
//!
//! Handles ingredient catalog commands: adding, listing, fetching,
//! searching, suggesting field values, updating, and deleting records over
//! the HTTP API.

use crate::routes::CreateIngredientResponse;
use crate::{
    Ingredient, cli_utils,
    commands::shared::{dispatch_command, read_candidate_or_exit, validate_args_count_or_exit},
    http_utils,
};

const INGREDIENT_USAGE: &str =
    "Usage: larderctl ingredient <add|list|get|search|suggest|update|delete> [args...]";

/// Handles all ingredient-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `client` - HTTP client for API communication
pub async fn handle_ingredient_command(args: &[String], client: &http_utils::LarderClient) {
    dispatch_command!("ingredient", INGREDIENT_USAGE, args, client, {
        "add" => handle_ingredient_add,
        "list" => handle_ingredient_list,
        "get" => handle_ingredient_get,
        "search" => handle_ingredient_search,
        "suggest" => handle_ingredient_suggest,
        "update" => handle_ingredient_update,
        "delete" => handle_ingredient_delete,
    });
}

/// Handles ingredient creation from a JSON file or inline JSON.
async fn handle_ingredient_add(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "add",
        "Usage: larderctl ingredient add <candidate.json|'{...}'>",
    );
    let candidate = read_candidate_or_exit(&args[1]);

    let response = http_utils::execute_or_exit(
        || client.post::<serde_json::Value, CreateIngredientResponse>("ingredients", &candidate),
        "Failed to add ingredient",
    )
    .await;

    println!(
        "Added ingredient {} ({})",
        response.ingredient.id, response.ingredient.name
    );
}

/// Handles ingredient listing.
async fn handle_ingredient_list(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(args, 1, 1, "list", "Usage: larderctl ingredient list");
    let ingredients = http_utils::execute_or_exit(
        || client.get::<Vec<Ingredient>>("ingredients"),
        "Failed to list ingredients",
    )
    .await;

    if ingredients.is_empty() {
        println!("No ingredients found");
    } else {
        println!("Ingredients:");
        for ingredient in &ingredients {
            cli_utils::print_ingredient_summary(ingredient);
        }
    }
}

/// Handles fetching a single ingredient by id.
async fn handle_ingredient_get(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(args, 2, 2, "get", "Usage: larderctl ingredient get <id>");
    let path = format!("ingredients/{}", args[1]);
    let ingredient = http_utils::execute_or_exit(
        || client.get::<Ingredient>(&path),
        "Failed to get ingredient",
    )
    .await;

    cli_utils::print_json_or_exit(&ingredient, "ingredient");
}

/// Handles substring search over names and categories.
async fn handle_ingredient_search(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "search",
        "Usage: larderctl ingredient search <query>",
    );
    let path = format!("ingredients/search?q={}", args[1]);
    let results = http_utils::execute_or_exit(
        || client.get::<Vec<Ingredient>>(&path),
        "Failed to search ingredients",
    )
    .await;

    if results.is_empty() {
        println!("No matches");
    } else {
        println!("Matches:");
        for ingredient in &results {
            cli_utils::print_ingredient_summary(ingredient);
        }
    }
}

/// Handles suggestion listing for a dotted field path.
async fn handle_ingredient_suggest(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "suggest",
        "Usage: larderctl ingredient suggest <field-path>  (e.g. category, location.place, size.unit)",
    );
    let path = format!("ingredients/suggestions/{}", args[1]);
    let values = http_utils::execute_or_exit(
        || client.get::<Vec<String>>(&path),
        "Failed to fetch suggestions",
    )
    .await;

    if values.is_empty() {
        println!("No values recorded for {}", args[1]);
    } else {
        for value in values {
            println!("{}", value);
        }
    }
}

/// Handles whole-record replacement by id.
async fn handle_ingredient_update(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(
        args,
        3,
        3,
        "update",
        "Usage: larderctl ingredient update <id> <candidate.json|'{...}'>",
    );
    let candidate = read_candidate_or_exit(&args[2]);
    let path = format!("ingredients/{}", args[1]);

    let ingredient = http_utils::execute_or_exit(
        || client.put::<serde_json::Value, Ingredient>(&path, &candidate),
        "Failed to update ingredient",
    )
    .await;

    println!("Updated ingredient {} ({})", ingredient.id, ingredient.name);
}

/// Handles ingredient deletion by id.
async fn handle_ingredient_delete(args: &[String], client: &http_utils::LarderClient) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "delete",
        "Usage: larderctl ingredient delete <id>",
    );
    let path = format!("ingredients/{}", args[1]);

    http_utils::execute_or_exit(|| client.delete(&path), "Failed to delete ingredient").await;

    println!("Deleted ingredient {}", args[1]);
}

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use larder::{Catalog, IngredientStore, SchemaProvider, create_ingredient_router};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "Path to the JSON document backing the ingredient store")]
    store: Option<String>,
    #[arrrg(optional, "Path to an external ingredient schema (default: built-in)")]
    schema: Option<String>,
    #[arrrg(optional, "Host to bind the HTTP server")]
    host: Option<String>,
    #[arrrg(optional, "Port to bind the HTTP server")]
    port: Option<u16>,
    #[arrrg(optional, "Admin token required for update/delete endpoints")]
    admin_token: Option<String>,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const HELP_TEXT: &str = r#"larderd - Larder pantry catalog daemon

USAGE:
    larderd [OPTIONS]

OPTIONS:
    --store <PATH>        Path to the JSON document backing the store [default: ingredients.json]
    --schema <PATH>       Path to an external ingredient schema [default: built-in schema]
    --host <HOST>         Host to bind the HTTP server [default: 127.0.0.1]
    --port <PORT>         Port to bind the HTTP server [default: 8080]
    --admin-token <TOK>   Admin token for update/delete (or LARDER_ADMIN_TOKEN env var);
                          when unset, update/delete are refused
    --verbose             Enable verbose logging

DESCRIPTION:
    Runs the larder daemon with the ingredient catalog endpoints mounted
    under /api/v1/

    The server supports graceful shutdown via Ctrl+C.

API ENDPOINTS:
    GET    /api/v1/ingredients                      List all ingredients
    POST   /api/v1/ingredients                      Create an ingredient (schema-validated)
    GET    /api/v1/ingredients/search?q=<query>     Search names and categories
    GET    /api/v1/ingredients/suggestions/{field}  Distinct values at a dotted field path
    GET    /api/v1/ingredients/{id}                 Get an ingredient
    PUT    /api/v1/ingredients/{id}                 Replace an ingredient (admin)
    DELETE /api/v1/ingredients/{id}                 Delete an ingredient (admin)"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line("USAGE: larderd [OPTIONS]");

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    let config = ServerConfig::from_args(args);

    if config.verbose {
        println!("Larder daemon starting with configuration:");
        println!("  Store: {}", config.store_path.display());
        match &config.schema_path {
            Some(path) => println!("  Schema: {}", path.display()),
            None => println!("  Schema: built-in"),
        }
        println!("  Bind address: {}:{}", config.host, config.port);
        println!(
            "  Admin endpoints: {}",
            if config.admin_token.is_some() {
                "enabled"
            } else {
                "disabled (no admin token)"
            }
        );
    }

    // A broken schema is fatal; a broken store document is not.
    let schema = match &config.schema_path {
        Some(path) => SchemaProvider::from_file(path)?,
        None => SchemaProvider::builtin(),
    };
    let store = IngredientStore::open(&config.store_path);

    if config.verbose {
        println!("Loaded {} ingredient(s) from the store", store.len());
    }

    let catalog = Arc::new(Mutex::new(Catalog::new(store, schema)));
    let ingredient_router = create_ingredient_router(catalog, config.admin_token.clone());

    let app = Router::new().nest("/api/v1", ingredient_router);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    println!("Larder daemon started");
    println!("Server listening on: http://{}", addr);
    println!("Store: {}", config.store_path.display());
    println!("Use Ctrl+C for graceful shutdown");

    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        () = shutdown_signal => {
            println!();
            println!("Shutdown signal received, stopping server");
            if config.verbose {
                println!("Store: {}", config.store_path.display());
            }
            println!("Larder daemon stopped");
        }
    }

    Ok(())
}

struct ServerConfig {
    store_path: PathBuf,
    schema_path: Option<PathBuf>,
    host: String,
    port: u16,
    admin_token: Option<String>,
    verbose: bool,
}

impl ServerConfig {
    fn from_args(args: Args) -> Self {
        Self {
            store_path: args
                .store
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ingredients.json")),
            schema_path: args.schema.map(PathBuf::from),
            host: args.host.unwrap_or_else(|| "127.0.0.1".to_string()),
            port: args.port.unwrap_or(8080),
            admin_token: args
                .admin_token
                .or_else(|| std::env::var("LARDER_ADMIN_TOKEN").ok())
                .filter(|t| !t.is_empty()),
            verbose: args.verbose,
        }
    }
}

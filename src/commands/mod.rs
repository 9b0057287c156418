//! # Command Handlers
//!
//! This module contains organized command handlers for the larderctl CLI
//! application. Each command type is implemented in a dedicated submodule.
//!
//! ## Structure
//!
//! - `ingredient` - Ingredient catalog commands (add, list, get, search, suggest, update, delete)
//! - `lookup` - Product database lookup for pre-filling candidates
//! - `shared` - Shared validation and dispatch utilities

pub mod ingredient;
pub mod lookup;
pub mod shared;

pub use ingredient::handle_ingredient_command;
pub use lookup::handle_lookup_command;

//! Deterministic ingredient identifier derivation.
//!
//! Ids are derived from the fields a user can see while filling in a record:
//! the ingredient name and its storage location. The same `(name, place,
//! shelf)` triple always yields the same id, so collaborators can recompute
//! it live while the user edits and fix it at submission time. An externally
//! supplied product code (a GTIN scanned off the package) always takes
//! precedence and suppresses derivation entirely.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
const ID_LENGTH: usize = 10;

/// Derives an ingredient id from its name and storage location.
///
/// The inputs are lower-cased, joined with `_`, and hashed with SHA-256;
/// the id is the first ten hex characters of the digest. The result is
/// guaranteed to contain at least one letter so downstream consumers can
/// never mistake it for a number.
///
/// # Examples
///
/// ```rust
/// use larder::generate_id;
///
/// let id = generate_id("Rice", "Pantry", 2);
/// assert_eq!(id, generate_id("rice", "pantry", 2));
/// assert_eq!(id.len(), 10);
/// ```
pub fn generate_id(name: &str, place: &str, shelf: u32) -> String {
    let data = format!("{}_{}_{}", name.to_lowercase(), place.to_lowercase(), shelf);
    let digest = Sha256::digest(data.as_bytes());
    ensure_alphabetic(hex::encode(digest)[..ID_LENGTH].to_string())
}

/// Selects the id for a candidate record: a non-empty external product code
/// verbatim, otherwise the derived hash id.
pub fn assign_id(code: Option<&str>, name: &str, place: &str, shelf: u32) -> String {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => generate_id(name, place, shelf),
    }
}

/// Replaces the last character with `a` when the id would be purely numeric.
fn ensure_alphabetic(mut id: String) -> String {
    if !id.chars().any(|c| c.is_ascii_alphabetic()) {
        id.pop();
        id.push('a');
    }
    id
}

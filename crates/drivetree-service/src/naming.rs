//! Name normalization shared by folders and files.

use drivetree_core::error::AppError;
use drivetree_core::result::AppResult;

/// Trim surrounding whitespace. Empty results are rejected.
///
/// Comparison between names is exact on the trimmed value, so `"Docs"` and
/// `"docs"` are different names.
pub fn normalize_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation("Invalid name"));
    }
    Ok(name.to_string())
}

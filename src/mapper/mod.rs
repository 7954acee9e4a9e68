//! Normalization of raw upstream JSON into typed domain records.
//!
//! Every mapper is a pure function over a borrowed `serde_json::Value`. Mapping fails fast on
//! the first missing required key or mistyped value; malformed array elements are never
//! skipped.

use serde_json::Value;
use thiserror::Error;

pub mod account;
pub mod catalog;
pub mod json;
pub mod match_data;

pub use account::{map_account, map_leaderboard, map_match_history};
pub use catalog::{layout_for, map_catalog, map_content, CategoryLayout, CATEGORY_LAYOUTS};
pub use json::{is_truthy, JsonObject};
pub use match_data::{map_location_list, map_match};

/// A required field was absent or had the wrong JSON type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("missing required key `{path}`")]
    MissingKey { path: String },

    #[error("`{path}` has unexpected type: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl StructuralError {
    pub(crate) fn mismatch(path: String, expected: &'static str, found: &Value) -> Self {
        StructuralError::TypeMismatch {
            path,
            expected,
            found: json::type_name(found),
        }
    }

    /// JSON path of the offending field, e.g. `$.roundResults[2].plantLocation.x`
    pub fn path(&self) -> &str {
        match self {
            StructuralError::MissingKey { path } | StructuralError::TypeMismatch { path, .. } => path,
        }
    }
}

pub type MapResult<T> = std::result::Result<T, StructuralError>;

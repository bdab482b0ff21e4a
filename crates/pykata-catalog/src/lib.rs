//! PyKata Challenge Catalog
//!
//! Provides the challenge data model and catalog operations:
//! - Challenge definitions (description, hint, starter code, test cases)
//! - Grouping into levels and topics, preserving authoring order
//! - Lookup and ordered navigation (next/previous, next uncompleted)
//!
//! The catalog is the producer of [`TestCase`] values: a test case's
//! `input` is Python literal source text (e.g. `"[1, 2, 3], 5"` or
//! `"TreeNode(1, TreeNode(2), None)"`), not a pre-parsed value. The
//! runtime crate consumes these verbatim.
//!
//! # Example
//!
//! ```
//! use pykata_catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let challenge = catalog.find("add-two-numbers").unwrap();
//! assert!(!challenge.test_cases.is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// One test case for a challenge.
///
/// `input` is source text in Python literal syntax; `expected` is the
/// value the submitted function must produce, as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single coding challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter_code: Option<String>,
    pub test_cases: Vec<TestCase>,
}

/// A named group of challenges within a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub challenges: Vec<Challenge>,
}

/// A difficulty level containing ordered topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub topics: Vec<Topic>,
}

/// The full challenge catalog.
///
/// Ordering is significant throughout: levels, topics, and challenges
/// keep their authoring order, and navigation operations walk the
/// flattened sequence in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub levels: Vec<Level>,
}

/// Built-in challenge set, embedded at compile time.
const BUILTIN_CHALLENGES: &str = include_str!("../assets/challenges.json");

impl Catalog {
    /// Load the built-in challenge set.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_CHALLENGES)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All challenges flattened into a single ordered sequence
    /// (levels, then topics, then challenges, in authoring order).
    pub fn all(&self) -> Vec<&Challenge> {
        self.levels
            .iter()
            .flat_map(|level| level.topics.iter())
            .flat_map(|topic| topic.challenges.iter())
            .collect()
    }

    /// Total number of challenges in the catalog.
    pub fn len(&self) -> usize {
        self.all().len()
    }

    /// Whether the catalog contains no challenges.
    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    /// Look up a challenge by id.
    pub fn find(&self, id: &str) -> Option<&Challenge> {
        self.all().into_iter().find(|c| c.id == id)
    }

    /// The level name containing the given challenge, if any.
    pub fn difficulty_of(&self, id: &str) -> Option<&str> {
        for level in &self.levels {
            for topic in &level.topics {
                if topic.challenges.iter().any(|c| c.id == id) {
                    return Some(level.name.as_str());
                }
            }
        }
        None
    }

    /// The challenge after the given one in catalog order, regardless of
    /// completion. `None` at the end of the catalog or for unknown ids.
    pub fn next_after(&self, id: &str) -> Option<&Challenge> {
        let all = self.all();
        let index = all.iter().position(|c| c.id == id)?;
        all.get(index + 1).copied()
    }

    /// The challenge before the given one in catalog order. `None` at the
    /// start of the catalog or for unknown ids.
    pub fn prev_before(&self, id: &str) -> Option<&Challenge> {
        let all = self.all();
        let index = all.iter().position(|c| c.id == id)?;
        if index == 0 {
            return None;
        }
        all.get(index - 1).copied()
    }

    /// The first uncompleted challenge after the given one, wrapping
    /// around to the start of the catalog. `None` when every challenge is
    /// completed or the id is unknown.
    pub fn next_uncompleted(&self, id: &str, completed: &HashSet<String>) -> Option<&Challenge> {
        let all = self.all();
        let index = all.iter().position(|c| c.id == id)?;

        let after = all.iter().skip(index + 1);
        let before = all.iter().take(index);
        after
            .chain(before)
            .find(|c| !completed.contains(&c.id))
            .copied()
    }

    /// Whether every challenge in the catalog has been completed.
    pub fn all_completed(&self, completed: &HashSet<String>) -> bool {
        self.all().iter().all(|c| completed.contains(&c.id))
    }
}

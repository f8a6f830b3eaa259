use serde::Deserialize;

use crate::error::MapError;

/// What to do when two fields of a record resolve to the same column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The field declared later takes the column.
    #[default]
    LastWins,
    /// Fail the query with `MapError::AmbiguousColumn`.
    Reject,
}

/// Mapper configuration — parsed from TOML.
///
/// ```toml
/// collisions = "reject"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfig {
    /// Field-to-column collision handling for typed queries.
    #[serde(default)]
    pub collisions: CollisionPolicy,
}

impl MapperConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, MapError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MapError::Config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, MapError> {
        toml::from_str(toml_str).map_err(|e| MapError::Config(e.to_string()))
    }
}

use std::collections::{BTreeMap, HashMap};

use crate::config::CollisionPolicy;
use crate::error::MapError;
use crate::record::FieldSpec;
use crate::tag::FieldTag;

/// Column position → field position, built per query.
///
/// Neither total (unmatched columns are absent) nor injective in general.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: BTreeMap<usize, usize>,
}

impl ColumnMapping {
    pub fn get(&self, column: usize) -> Option<usize> {
        self.entries.get(&column).copied()
    }

    /// `(column, field)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().map(|(c, f)| (*c, *f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(usize, usize)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Match result-set columns to record fields.
///
/// Column names are indexed with last-position-wins. Each non-ignored field,
/// in declaration order, takes the first hit of:
///
/// 1. the full raw annotation,
/// 2. the column part of a `table.column` annotation,
/// 3. the field's own name.
///
/// Fields with no hit stay unmapped. When two fields hit the same column the
/// later one wins under `CollisionPolicy::LastWins`; `Reject` fails instead.
pub fn resolve(
    columns: &[String],
    fields: &[FieldSpec],
    policy: CollisionPolicy,
) -> Result<ColumnMapping, MapError> {
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(columns.len());
    for (i, name) in columns.iter().enumerate() {
        by_name.insert(name.as_str(), i);
    }

    let mut entries: BTreeMap<usize, usize> = BTreeMap::new();
    for spec in fields {
        let Some(raw) = spec.raw_tag else { continue };
        if spec.tag.is_ignored() {
            continue;
        }

        let hit = by_name
            .get(raw)
            .or_else(|| match spec.tag {
                FieldTag::Qualified { column, .. } => by_name.get(column),
                _ => None,
            })
            .or_else(|| by_name.get(spec.name))
            .copied();

        let Some(column) = hit else {
            tracing::trace!(field = spec.name, tag = raw, "no matching column");
            continue;
        };

        if let Some(previous) = entries.insert(column, spec.index) {
            let first = fields
                .iter()
                .find(|f| f.index == previous)
                .map_or("?", |f| f.name);
            match policy {
                CollisionPolicy::LastWins => tracing::debug!(
                    column = %columns[column],
                    replaced = first,
                    field = spec.name,
                    "column claimed by a later field"
                ),
                CollisionPolicy::Reject => {
                    return Err(MapError::AmbiguousColumn {
                        column: columns[column].clone(),
                        first: first.to_string(),
                        second: spec.name.to_string(),
                    })
                }
            }
        }
    }

    Ok(ColumnMapping { entries })
}

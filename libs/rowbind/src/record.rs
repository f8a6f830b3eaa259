use std::collections::HashSet;

use crate::tag::FieldTag;
use crate::value::Value;

/// One declared field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as written in the struct.
    pub name: &'static str,
    /// Raw `#[db("...")]` annotation, `None` when absent.
    pub tag: Option<&'static str>,
}

/// Compile-time field registry of a fixed-shape record type.
///
/// Usually produced by `#[derive(Record)]`. A hand-written impl must list
/// every field in declaration order and use the same indices in
/// `set_field` / `field_value`.
pub trait Record: Default {
    /// All declared fields, in declaration order.
    fn fields() -> &'static [FieldDef];

    /// Decode `value` into the field at `index`. Unknown or ignored indices
    /// are a no-op.
    fn set_field(&mut self, index: usize, value: &Value);

    /// Current value of the field at `index`, `None` for unknown or ignored
    /// indices.
    fn field_value(&self, index: usize) -> Option<Value>;
}

/// A field together with its parsed annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub index: usize,
    pub name: &'static str,
    pub raw_tag: Option<&'static str>,
    pub tag: FieldTag<'static>,
}

/// Field specs of `T`, in declaration order.
pub fn field_specs<T: Record>() -> Vec<FieldSpec> {
    T::fields()
        .iter()
        .enumerate()
        .map(|(index, def)| FieldSpec {
            index,
            name: def.name,
            raw_tag: def.tag,
            tag: FieldTag::parse(def.tag),
        })
        .collect()
}

/// Check that `T` describes a structure: at least one field, every field
/// named, no name declared twice.
///
/// Returns a human-readable reason on failure.
pub fn check_shape<T: Record>() -> Result<(), String> {
    let fields = T::fields();
    let type_name = std::any::type_name::<T>();
    if fields.is_empty() {
        return Err(format!("{type_name} declares no fields"));
    }
    let mut seen = HashSet::with_capacity(fields.len());
    for (index, def) in fields.iter().enumerate() {
        if def.name.is_empty() {
            return Err(format!("{type_name}: field #{index} has no name"));
        }
        if !seen.insert(def.name) {
            return Err(format!("{type_name}: field '{}' declared twice", def.name));
        }
    }
    Ok(())
}

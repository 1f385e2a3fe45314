//! Column metadata model.
//!
//! [`ColumnMeta`] is supplied by the host language's reflection layer
//! (attribute/annotation discovery is explicitly out of scope here — this
//! module only consumes an already-populated list). It is injected once
//! per [`crate::context::PlaceholderContext`] and is immutable thereafter.

use crate::value::DbType;

/// One column of the target table.
///
/// `name` is the emitted, snake_case SQL identifier; `property_name` is the
/// caller-side identifier (a struct field name, say) used by `--exclude`
/// and `--inline` directive options. The two are deliberately allowed to
/// diverge — `--exclude` matches on `property_name`, case-sensitively,
/// never on the emitted `name` (spec invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub property_name: String,
    pub db_type: DbType,
    pub is_nullable: bool,
}

impl ColumnMeta {
    pub fn new(
        name: impl Into<String>,
        property_name: impl Into<String>,
        db_type: DbType,
        is_nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            property_name: property_name.into(),
            db_type,
            is_nullable,
        }
    }

    /// Convenience constructor deriving `name` from `property_name` via
    /// [`crate::name_mapper::to_snake_case`], the way a reflection-based
    /// caller would when the property name already reads as an identifier.
    pub fn from_property(
        property_name: impl Into<String>,
        db_type: DbType,
        is_nullable: bool,
    ) -> Self {
        let property_name = property_name.into();
        let name = crate::name_mapper::to_snake_case(Some(&property_name))
            .expect("property_name is Some, so to_snake_case cannot fail");
        Self {
            name,
            property_name,
            db_type,
            is_nullable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_property_derives_snake_case_name() {
        let col = ColumnMeta::from_property("FirstName", DbType::String, false);
        assert_eq!(col.name, "first_name");
        assert_eq!(col.property_name, "FirstName");
    }
}

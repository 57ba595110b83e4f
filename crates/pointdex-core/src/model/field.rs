use pointdex_primitives::NumberKind;
use std::fmt::{self, Display};

///
/// FieldConfig
/// Immutable per-field declaration for a numeric point field.
///
/// A multi-valued field with a scalar column only supports single-value
/// selection reads; indexing more than one column value per document is
/// rejected.
///

#[derive(Clone, Debug, Eq, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FieldConfig {
    name: String,
    kind: NumberKind,
    indexed: bool,
    stored: bool,
    scalar_column: bool,
    multi_valued: bool,
}

impl FieldConfig {
    /// Indexed, single-valued field with no stored copy or scalar column.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NumberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            indexed: true,
            stored: false,
            scalar_column: false,
            multi_valued: false,
        }
    }

    #[must_use]
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    #[must_use]
    pub fn with_stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    #[must_use]
    pub fn with_scalar_column(mut self, scalar_column: bool) -> Self {
        self.scalar_column = scalar_column;
        self
    }

    #[must_use]
    pub fn with_multi_valued(mut self, multi_valued: bool) -> Self {
        self.multi_valued = multi_valued;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> NumberKind {
        self.kind
    }

    #[must_use]
    pub const fn indexed(&self) -> bool {
        self.indexed
    }

    #[must_use]
    pub const fn stored(&self) -> bool {
        self.stored
    }

    #[must_use]
    pub const fn has_scalar_column(&self) -> bool {
        self.scalar_column
    }

    #[must_use]
    pub const fn multi_valued(&self) -> bool {
        self.multi_valued
    }

    /// Whether range queries can run against the scalar column alone.
    #[must_use]
    pub const fn is_column_only(&self) -> bool {
        !self.indexed && self.scalar_column
    }
}

impl Display for FieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            ("indexed", self.indexed),
            ("stored", self.stored),
            ("scalar_column", self.scalar_column),
            ("multi_valued", self.multi_valued),
        ];
        let set: Vec<&str> = flags
            .iter()
            .filter(|(_, on)| *on)
            .map(|(label, _)| *label)
            .collect();

        write!(f, "{}:{}[{}]", self.name, self.kind, set.join(","))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_indexed_single_value() {
        let field = FieldConfig::new("price", NumberKind::Float64);
        assert!(field.indexed());
        assert!(!field.stored());
        assert!(!field.has_scalar_column());
        assert!(!field.multi_valued());
        assert!(!field.is_column_only());
    }

    #[test]
    fn display_lists_enabled_flags() {
        let field = FieldConfig::new("qty", NumberKind::Int32)
            .with_indexed(false)
            .with_scalar_column(true)
            .with_stored(true);
        assert_eq!(field.to_string(), "qty:int32[stored,scalar_column]");
        assert!(field.is_column_only());
    }
}

#[macro_use]
mod macros;

use std::fmt;

///
/// NumberKind
///
/// Closed set of numeric field kinds a point field can be declared with.
/// `Date` is stored as epoch milliseconds in a signed 64-bit integer.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NumberKind {
    Date,
    Float32,
    Float64,
    Int32,
    Int64,
}

impl NumberKind {
    /// Return the full metadata descriptor for one number kind.
    #[must_use]
    pub const fn metadata(self) -> NumberMetadata {
        number_kind_registry!(metadata_from_registry, self)
    }

    /// Return the native storage width of this kind.
    #[must_use]
    pub const fn width(self) -> BitWidth {
        self.metadata().width
    }

    /// Return the stable lowercase label used in schema declarations.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Return whether values of this kind are IEEE-754 floating point.
    #[must_use]
    pub const fn is_floating(self) -> bool {
        self.metadata().is_floating
    }

    /// Return whether values of this kind are epoch timestamps.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        self.metadata().is_temporal
    }

    /// Resolve a schema label (case-insensitive) to its kind.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        number_kind_registry!(kind_from_label_registry, label)
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// NumberMetadata
///
/// Capability metadata shared across codec and schema layers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NumberMetadata {
    pub width: BitWidth,
    pub label: &'static str,
    pub is_floating: bool,
    pub is_temporal: bool,
}

///
/// BitWidth
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BitWidth {
    Bits32,
    Bits64,
}

impl BitWidth {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }
}

/// Ordered list of all number kinds in registry order.
pub const ALL_NUMBER_KINDS: [NumberKind; 5] = number_kind_registry!(all_kinds_from_registry);

///
/// TESTS
///

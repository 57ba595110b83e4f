//! Numeric point-field query construction: range, exact and set queries over
//! indexed points or scalar columns, single-value selection for multi-valued
//! columns, and per-document field construction.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod adapter;
pub mod codec;
pub mod config;
pub mod date;
pub mod document;
pub mod error;
pub mod model;
pub mod query;
pub mod select;
pub mod translate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use pointdex_primitives::{BitWidth, NumberKind, NumberMetadata};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No codecs, planners or error details are re-exported here.
///

pub mod prelude {
    pub use crate::{
        adapter::PointFieldAdapter,
        config::SchemaConfig,
        document::{IndexableField, MemoryDocument},
        error::InternalError,
        model::field::FieldConfig,
        query::{DocReader, Query},
        select::MultiValueSelector,
        translate::RangeRequest,
        value::NumericValue,
    };
    pub use pointdex_primitives::NumberKind;
}

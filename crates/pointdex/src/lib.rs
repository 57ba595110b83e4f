//! ## Crate layout
//! - `core`: range translation, the point-field adapter, queries, documents,
//!   date math and schema config.
//! - `primitives`: the closed set of numeric kinds and their capability metadata.
//!
//! The `prelude` module carries the vocabulary needed to declare fields,
//! build queries and index documents.

pub use pointdex_core as core;
pub use pointdex_primitives as primitives;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Errors
//

pub use pointdex_core::error::{ErrorClass, ErrorOrigin, InternalError as Error};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        adapter::PointFieldAdapter,
        config::SchemaConfig,
        date::DateMath,
        document::{IndexableField, MemoryDocument},
        model::field::FieldConfig,
        query::{DocReader as _, Query},
        select::MultiValueSelector,
        translate::RangeRequest,
        value::NumericValue,
    };
    pub use crate::primitives::NumberKind;
}

///
/// TESTS
///

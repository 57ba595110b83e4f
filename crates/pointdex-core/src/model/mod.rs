//! Runtime field model.
//!
//! Types in `model` are built once when a schema is loaded and then only read
//! by query construction and document indexing. Schema reload builds fresh
//! instances; nothing here is mutated in place.
pub mod field;

//! Module: config
//! Responsibility: TOML schema declarations into immutable field configs.
//! Does not own: field semantics (see `model::field`).
//! Boundary: loaded once; the adapter only ever sees `FieldConfig`.

use crate::model::field::FieldConfig;
use pointdex_primitives::NumberKind;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("schema config is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("field '{field}' has unknown kind '{kind}'")]
    UnknownKind { field: String, kind: String },

    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },
}

///
/// FieldDecl
///
/// One `[[field]]` table as written in the schema file.
///

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldDecl {
    name: String,
    kind: String,
    #[serde(default = "default_indexed")]
    indexed: bool,
    #[serde(default)]
    stored: bool,
    #[serde(default)]
    scalar_column: bool,
    #[serde(default)]
    multi_valued: bool,
}

const fn default_indexed() -> bool {
    true
}

impl FieldDecl {
    fn into_field(self) -> Result<FieldConfig, ConfigError> {
        let Some(kind) = NumberKind::from_label(&self.kind) else {
            return Err(ConfigError::UnknownKind {
                field: self.name,
                kind: self.kind,
            });
        };

        Ok(FieldConfig::new(self.name, kind)
            .with_indexed(self.indexed)
            .with_stored(self.stored)
            .with_scalar_column(self.scalar_column)
            .with_multi_valued(self.multi_valued))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDecl {
    #[serde(default)]
    field: Vec<FieldDecl>,
}

///
/// SchemaConfig
///
/// Ordered set of field configs, unique by name.
///

#[derive(Clone, Debug, Default)]
pub struct SchemaConfig {
    fields: Vec<FieldConfig>,
}

impl SchemaConfig {
    /// Parse a schema from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let decl: SchemaDecl = toml::from_str(text)?;

        Self::from_fields(
            decl.field
                .into_iter()
                .map(FieldDecl::into_field)
                .collect::<Result<Vec<_>, _>>()?,
        )
    }

    /// Build a schema from already-constructed configs.
    pub fn from_fields(fields: Vec<FieldConfig>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name()) {
                return Err(ConfigError::DuplicateField {
                    field: field.name().to_string(),
                });
            }
        }

        log::debug!("loaded schema with {} field(s)", fields.len());

        Ok(Self { fields })
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// TESTS
///

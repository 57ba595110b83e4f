use crate::{
    config::ConfigError, date::DateParseError, document::FieldBuildError, select::SelectError,
    translate::BoundParseError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured error with a stable classification.
/// Every error is scoped to the single request or document it concerns;
/// nothing in this crate retries.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without structured detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct an InternalError carrying structured detail.
    pub(crate) fn with_detail(class: ErrorClass, origin: ErrorOrigin, detail: ErrorDetail) -> Self {
        Self {
            class,
            origin,
            message: detail.to_string(),
            detail: Some(detail),
        }
    }

    /// Construct a query-origin defect and log it for diagnosis.
    pub(crate) fn query_internal(message: impl Into<String>) -> Self {
        let message = message.into();
        log::error!("query defect: {message}");

        Self::new(ErrorClass::Internal, ErrorOrigin::Query, message)
    }

    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self.class, ErrorClass::InvalidInput)
    }

    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self.class, ErrorClass::Unsupported)
    }

    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self.class, ErrorClass::Internal)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Bound(BoundParseError),

    #[error("{0}")]
    Select(SelectError),

    #[error("{0}")]
    FieldBuild(FieldBuildError),

    #[error("{0}")]
    Config(ConfigError),
}

impl From<BoundParseError> for InternalError {
    fn from(err: BoundParseError) -> Self {
        Self::with_detail(
            ErrorClass::InvalidInput,
            ErrorOrigin::Query,
            ErrorDetail::Bound(err),
        )
    }
}

impl From<SelectError> for InternalError {
    fn from(err: SelectError) -> Self {
        Self::with_detail(
            ErrorClass::InvalidInput,
            ErrorOrigin::Select,
            ErrorDetail::Select(err),
        )
    }
}

impl From<FieldBuildError> for InternalError {
    fn from(err: FieldBuildError) -> Self {
        let class = match err {
            FieldBuildError::MultiValuedScalarColumn { .. } => ErrorClass::Unsupported,
            FieldBuildError::InvalidValue { .. } => ErrorClass::InvalidInput,
        };

        Self::with_detail(class, ErrorOrigin::Index, ErrorDetail::FieldBuild(err))
    }
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::with_detail(
            ErrorClass::InvalidInput,
            ErrorOrigin::Config,
            ErrorDetail::Config(err),
        )
    }
}

impl From<DateParseError> for InternalError {
    fn from(err: DateParseError) -> Self {
        Self::new(ErrorClass::InvalidInput, ErrorOrigin::Query, err.to_string())
    }
}

///
/// ErrorClass
/// Error taxonomy for request-boundary classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// Malformed bound or value text, or an unusable selector request.
    InvalidInput,
    /// Field configuration that can never accept the operation.
    Unsupported,
    /// Inconsistency between field declaration and translator coverage.
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid_input",
            Self::Unsupported => "unsupported",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Query,
    Index,
    Select,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Query => "query",
            Self::Index => "index",
            Self::Select => "select",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///

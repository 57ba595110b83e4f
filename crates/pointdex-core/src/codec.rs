//! Module: codec
//! Responsibility: per-kind parsing, bit decoding, and float bit constants.
//! Does not own: range branch selection (see `translate`).
//! Boundary: translator and adapter resolve behavior through `codec_for`.

use crate::{date::DateMath, date::DateParseError, value::NumericValue};
use pointdex_primitives::NumberKind;
use thiserror::Error as ThisError;

///
/// ValueParseError
///
/// Textual value could not be read as the declared kind.
///

#[derive(Debug, ThisError)]
pub enum ValueParseError {
    #[error("'{text}' is not a valid {kind} value: {reason}")]
    Malformed {
        kind: NumberKind,
        text: String,
        reason: String,
    },

    #[error(transparent)]
    Date(#[from] DateParseError),
}

impl ValueParseError {
    fn malformed(kind: NumberKind, text: &str, reason: impl ToString) -> Self {
        Self::Malformed {
            kind,
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}

///
/// FloatBits
///
/// Signed bit patterns of the IEEE-754 landmarks for one float width,
/// sign-extended to i64 for the 32-bit width.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FloatBits {
    pub negative_infinity: i64,
    pub positive_infinity: i64,
    pub negative_zero: i64,
    pub zero: i64,
}

const FLOAT32_BITS: FloatBits = FloatBits {
    negative_infinity: NumericValue::Float32(f32::NEG_INFINITY).to_bits(),
    positive_infinity: NumericValue::Float32(f32::INFINITY).to_bits(),
    negative_zero: NumericValue::Float32(-0.0).to_bits(),
    zero: NumericValue::Float32(0.0).to_bits(),
};

const FLOAT64_BITS: FloatBits = FloatBits {
    negative_infinity: NumericValue::Float64(f64::NEG_INFINITY).to_bits(),
    positive_infinity: NumericValue::Float64(f64::INFINITY).to_bits(),
    negative_zero: NumericValue::Float64(-0.0).to_bits(),
    zero: NumericValue::Float64(0.0).to_bits(),
};

///
/// NumberCodec
///
/// Capability table for one number kind.
///

pub trait NumberCodec: Send + Sync {
    fn kind(&self) -> NumberKind;

    /// Read one textual value as this kind.
    fn parse(&self, text: &str, dates: &DateMath) -> Result<NumericValue, ValueParseError>;

    /// Inverse of [`NumericValue::to_bits`] for this kind.
    fn decode(&self, bits: i64) -> NumericValue;

    /// IEEE-754 landmarks; `None` for integer-like kinds.
    fn float_bits(&self) -> Option<FloatBits> {
        None
    }
}

struct Int32Codec;

impl NumberCodec for Int32Codec {
    fn kind(&self) -> NumberKind {
        NumberKind::Int32
    }

    fn parse(&self, text: &str, _: &DateMath) -> Result<NumericValue, ValueParseError> {
        text.parse::<i32>()
            .map(NumericValue::Int32)
            .map_err(|err| ValueParseError::malformed(self.kind(), text, err))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn decode(&self, bits: i64) -> NumericValue {
        NumericValue::Int32(bits as i32)
    }
}

struct Int64Codec;

impl NumberCodec for Int64Codec {
    fn kind(&self) -> NumberKind {
        NumberKind::Int64
    }

    fn parse(&self, text: &str, _: &DateMath) -> Result<NumericValue, ValueParseError> {
        text.parse::<i64>()
            .map(NumericValue::Int64)
            .map_err(|err| ValueParseError::malformed(self.kind(), text, err))
    }

    fn decode(&self, bits: i64) -> NumericValue {
        NumericValue::Int64(bits)
    }
}

struct DateCodec;

impl NumberCodec for DateCodec {
    fn kind(&self) -> NumberKind {
        NumberKind::Date
    }

    fn parse(&self, text: &str, dates: &DateMath) -> Result<NumericValue, ValueParseError> {
        Ok(NumericValue::Date(dates.parse_millis(text)?))
    }

    fn decode(&self, bits: i64) -> NumericValue {
        NumericValue::Date(bits)
    }
}

struct Float32Codec;

impl NumberCodec for Float32Codec {
    fn kind(&self) -> NumberKind {
        NumberKind::Float32
    }

    fn parse(&self, text: &str, _: &DateMath) -> Result<NumericValue, ValueParseError> {
        text.trim()
            .parse::<f32>()
            .map(NumericValue::Float32)
            .map_err(|err| ValueParseError::malformed(self.kind(), text, err))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn decode(&self, bits: i64) -> NumericValue {
        NumericValue::Float32(f32::from_bits((bits as i32).cast_unsigned()))
    }

    fn float_bits(&self) -> Option<FloatBits> {
        Some(FLOAT32_BITS)
    }
}

struct Float64Codec;

impl NumberCodec for Float64Codec {
    fn kind(&self) -> NumberKind {
        NumberKind::Float64
    }

    fn parse(&self, text: &str, _: &DateMath) -> Result<NumericValue, ValueParseError> {
        text.trim()
            .parse::<f64>()
            .map(NumericValue::Float64)
            .map_err(|err| ValueParseError::malformed(self.kind(), text, err))
    }

    fn decode(&self, bits: i64) -> NumericValue {
        NumericValue::Float64(f64::from_bits(bits.cast_unsigned()))
    }

    fn float_bits(&self) -> Option<FloatBits> {
        Some(FLOAT64_BITS)
    }
}

/// Resolve the codec for one number kind.
#[must_use]
pub fn codec_for(kind: NumberKind) -> &'static dyn NumberCodec {
    match kind {
        NumberKind::Date => &DateCodec,
        NumberKind::Float32 => &Float32Codec,
        NumberKind::Float64 => &Float64Codec,
        NumberKind::Int32 => &Int32Codec,
        NumberKind::Int64 => &Int64Codec,
    }
}

///
/// TESTS
///

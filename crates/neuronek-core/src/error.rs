//! Boundary errors.
//!
//! Validation happens when substance tables, dose logs and render configs are
//! built. The render path itself is total and never returns these.

use std::fmt;

use crate::substance::SubstanceId;

/// A substance definition or substance table could not be built.
#[derive(Debug)]
pub enum SubstanceError {
    /// Name is empty or only whitespace.
    EmptyName,
    /// Half-life is zero, negative, NaN or too large to represent.
    NonPositiveHalfLife { name: String },
    /// Symbol is whitespace or a control character.
    InvalidSymbol { name: String, symbol: char },
    /// Colour is not `#rrggbb`.
    InvalidColor(String),
    /// Two substances share a name (case-insensitive).
    DuplicateName(String),
    /// Two substances share a symbol.
    DuplicateSymbol(char),
    /// Substance file could not be read.
    Io(std::io::Error),
    /// Substance file is not valid JSON for a substance list.
    Parse(serde_json::Error),
}

impl fmt::Display for SubstanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "substance name must not be empty"),
            Self::NonPositiveHalfLife { name } => {
                write!(f, "substance '{name}': half-life must be a positive duration")
            }
            Self::InvalidSymbol { name, symbol } => {
                write!(f, "substance '{name}': symbol {symbol:?} is not printable")
            }
            Self::InvalidColor(c) => write!(f, "invalid colour '{c}' (expected #rrggbb)"),
            Self::DuplicateName(n) => write!(f, "duplicate substance name '{n}'"),
            Self::DuplicateSymbol(s) => write!(f, "duplicate substance symbol '{s}'"),
            Self::Io(e) => write!(f, "cannot read substance file: {e}"),
            Self::Parse(e) => write!(f, "cannot parse substance file: {e}"),
        }
    }
}

impl std::error::Error for SubstanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SubstanceError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SubstanceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// A dose was rejected by [`DoseLog::record`](crate::DoseLog::record).
#[derive(Debug, Clone, PartialEq)]
pub enum DoseError {
    /// Amount is zero, negative or not finite.
    NonPositiveAmount(f64),
    /// The id does not belong to the substance table.
    UnknownSubstance(SubstanceId),
}

impl fmt::Display for DoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(a) => write!(f, "dose amount must be positive, got {a}"),
            Self::UnknownSubstance(id) => write!(f, "unknown substance #{}", id.index()),
        }
    }
}

impl std::error::Error for DoseError {}

/// A render configuration file could not be loaded or is inconsistent.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config: {e}"),
            Self::Parse(e) => write!(f, "cannot parse config: {e}"),
            Self::Invalid(why) => write!(f, "invalid config: {why}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

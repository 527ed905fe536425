//! Substance definitions and the validated, ordered substance table.
//!
//! The table's order is the declaration order: it decides legend order, draw
//! order and therefore which curve wins a shared cell.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SubstanceError;

/// Position of a substance in its [`SubstanceTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubstanceId(pub(crate) usize);

impl SubstanceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// 24-bit display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, SubstanceError> {
        let invalid = || SubstanceError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// An immutable substance definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Substance {
    name: String,
    half_life: Duration,
    color: Rgb,
    symbol: char,
}

impl Substance {
    /// Build a substance, rejecting a zero half-life or an unprintable symbol.
    pub fn new(
        name: impl Into<String>,
        half_life: Duration,
        color: Rgb,
        symbol: char,
    ) -> Result<Self, SubstanceError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SubstanceError::EmptyName);
        }
        if half_life.is_zero() {
            return Err(SubstanceError::NonPositiveHalfLife { name });
        }
        if symbol.is_whitespace() || symbol.is_control() {
            return Err(SubstanceError::InvalidSymbol { name, symbol });
        }
        Ok(Self {
            name,
            half_life,
            color,
            symbol,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn half_life(&self) -> Duration {
        self.half_life
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn to_spec(&self) -> SubstanceSpec {
        SubstanceSpec {
            name: self.name.clone(),
            half_life_hours: self.half_life.as_secs_f64() / 3600.0,
            color: self.color.to_string(),
            symbol: self.symbol,
        }
    }
}

/// On-disk form of a substance (one element of a JSON array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceSpec {
    pub name: String,
    pub half_life_hours: f64,
    pub color: String,
    pub symbol: char,
}

impl SubstanceSpec {
    pub fn build(&self) -> Result<Substance, SubstanceError> {
        let non_positive = || SubstanceError::NonPositiveHalfLife {
            name: self.name.clone(),
        };
        if !self.half_life_hours.is_finite() || self.half_life_hours <= 0.0 {
            return Err(non_positive());
        }
        let half_life = Duration::try_from_secs_f64(self.half_life_hours * 3600.0)
            .map_err(|_| non_positive())?;
        Substance::new(
            self.name.as_str(),
            half_life,
            Rgb::from_hex(&self.color)?,
            self.symbol,
        )
    }
}

/// Ordered list of known substances. Names and symbols are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstanceTable {
    substances: Vec<Substance>,
}

impl SubstanceTable {
    pub fn new(substances: Vec<Substance>) -> Result<Self, SubstanceError> {
        let mut names = HashSet::new();
        let mut symbols = HashSet::new();
        for s in &substances {
            if !names.insert(s.name.to_lowercase()) {
                return Err(SubstanceError::DuplicateName(s.name.clone()));
            }
            // lookup by symbol ignores ASCII case, so uniqueness must too
            if !symbols.insert(s.symbol.to_ascii_lowercase()) {
                return Err(SubstanceError::DuplicateSymbol(s.symbol));
            }
        }
        log::debug!("substance table built with {} entries", substances.len());
        Ok(Self { substances })
    }

    pub fn from_specs(specs: &[SubstanceSpec]) -> Result<Self, SubstanceError> {
        let substances = specs
            .iter()
            .map(SubstanceSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(substances)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SubstanceError> {
        let specs: Vec<SubstanceSpec> = serde_json::from_str(json)?;
        Self::from_specs(&specs)
    }

    /// Load a JSON array of [`SubstanceSpec`] from disk.
    pub fn load(path: &Path) -> Result<Self, SubstanceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Caffeine, L-Theanine, Modafinil and Nicotine on a Tokyo Night palette.
    pub fn builtin() -> Self {
        const HOUR: u64 = 3600;
        let entry = |name: &str, hours: u64, color: Rgb, symbol: char| Substance {
            name: name.to_string(),
            half_life: Duration::from_secs(hours * HOUR),
            color,
            symbol,
        };
        Self {
            substances: vec![
                entry("Caffeine", 5, Rgb::new(0xf7, 0x76, 0x8e), 'C'),
                entry("L-Theanine", 3, Rgb::new(0x9e, 0xce, 0x6a), 'T'),
                entry("Modafinil", 12, Rgb::new(0x7a, 0xa2, 0xf7), 'M'),
                entry("Nicotine", 2, Rgb::new(0xe0, 0xaf, 0x68), 'N'),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.substances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.substances.is_empty()
    }

    pub fn get(&self, id: SubstanceId) -> Option<&Substance> {
        self.substances.get(id.0)
    }

    pub fn contains(&self, id: SubstanceId) -> bool {
        id.0 < self.substances.len()
    }

    /// Ids in declaration order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = SubstanceId> + use<> {
        (0..self.substances.len()).map(SubstanceId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubstanceId, &Substance)> {
        self.substances
            .iter()
            .enumerate()
            .map(|(i, s)| (SubstanceId(i), s))
    }

    pub fn find_by_symbol(&self, symbol: char) -> Option<SubstanceId> {
        self.substances
            .iter()
            .position(|s| s.symbol.eq_ignore_ascii_case(&symbol))
            .map(SubstanceId)
    }

    pub fn find_by_name(&self, name: &str) -> Option<SubstanceId> {
        let name = name.trim().to_lowercase();
        self.substances
            .iter()
            .position(|s| s.name.to_lowercase() == name)
            .map(SubstanceId)
    }
}

use std::fmt;
use std::str::FromStr;

use super::BlockKind;

/// A synthetic token linking a control-open tag to its `ELSE` and `END`.
///
/// Correlation ids are the block kind's prefix letter followed by a serial
/// number, e.g. `I1`, `F2`, `U3`. They are allocated while disambiguating a
/// single template and are only unique within that call.
///
/// # Example
///
/// ```
/// use ttiny::{BlockKind, CorrelationId};
///
/// let id = CorrelationId::new(BlockKind::Foreach, 7);
/// assert_eq!(id.to_string(), "F7");
/// assert_eq!("F7".parse::<CorrelationId>(), Ok(id));
/// ```
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub struct CorrelationId {
    kind: BlockKind,
    serial: u32,
}

impl CorrelationId {
    pub fn new(kind: BlockKind, serial: u32) -> Self {
        Self { kind, serial }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.serial)
    }
}

/// Error returned when a string is not a correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCorrelationId;

impl fmt::Display for InvalidCorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a correlation id such as I1, U2 or F3")
    }
}

impl FromStr for CorrelationId {
    type Err = InvalidCorrelationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(BlockKind::from_prefix)
            .ok_or(InvalidCorrelationId)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidCorrelationId);
        }
        let serial = digits.parse().map_err(|_| InvalidCorrelationId)?;
        Ok(Self { kind, serial })
    }
}

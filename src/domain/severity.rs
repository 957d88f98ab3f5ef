use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};

/// Bitmask of host error levels.
///
/// `Severity` doubles as the level of a single event and as a mask:
/// configuration and the host's live reporting state are both unions of
/// these bits. Bits this crate has no name for are preserved and render
/// numerically, so a host-private level is still reportable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Severity(u32);

impl Severity {
    pub const FATAL: Severity = Severity(1);
    pub const WARNING: Severity = Severity(1 << 1);
    pub const PARSE: Severity = Severity(1 << 2);
    pub const NOTICE: Severity = Severity(1 << 3);
    pub const CORE_ERROR: Severity = Severity(1 << 4);
    pub const CORE_WARNING: Severity = Severity(1 << 5);
    pub const COMPILE_ERROR: Severity = Severity(1 << 6);
    pub const COMPILE_WARNING: Severity = Severity(1 << 7);
    pub const USER_ERROR: Severity = Severity(1 << 8);
    pub const USER_WARNING: Severity = Severity(1 << 9);
    pub const USER_NOTICE: Severity = Severity(1 << 10);
    pub const RECOVERABLE: Severity = Severity(1 << 11);
    pub const DEPRECATED: Severity = Severity(1 << 12);
    pub const USER_DEPRECATED: Severity = Severity(1 << 13);

    /// Every level, including bits without a name here.
    pub const ALL: Severity = Severity(u32::MAX);
    pub const NONE: Severity = Severity(0);

    /// Levels the host records as a "last error" instead of dispatching
    /// through the live handler chain; checked on the shutdown path.
    pub const FATAL_SET: Severity = Severity(
        Self::FATAL.0
            | Self::PARSE.0
            | Self::CORE_ERROR.0
            | Self::CORE_WARNING.0
            | Self::COMPILE_ERROR.0
            | Self::COMPILE_WARNING.0,
    );

    pub const fn from_bits(bits: u32) -> Self {
        Severity(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Bitwise membership test: true when any bit is shared.
    pub const fn intersects(self, other: Severity) -> bool {
        self.0 & other.0 != 0
    }

    /// Name of an exactly-known single level, `None` for unknown bits or
    /// combinations.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::FATAL => Some("FATAL"),
            Self::WARNING => Some("WARNING"),
            Self::PARSE => Some("PARSE"),
            Self::NOTICE => Some("NOTICE"),
            Self::CORE_ERROR => Some("CORE_ERROR"),
            Self::CORE_WARNING => Some("CORE_WARNING"),
            Self::COMPILE_ERROR => Some("COMPILE_ERROR"),
            Self::COMPILE_WARNING => Some("COMPILE_WARNING"),
            Self::USER_ERROR => Some("USER_ERROR"),
            Self::USER_WARNING => Some("USER_WARNING"),
            Self::USER_NOTICE => Some("USER_NOTICE"),
            Self::RECOVERABLE => Some("RECOVERABLE"),
            Self::DEPRECATED => Some("DEPRECATED"),
            Self::USER_DEPRECATED => Some("USER_DEPRECATED"),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl BitOr for Severity {
    type Output = Severity;

    fn bitor(self, rhs: Severity) -> Severity {
        Severity(self.0 | rhs.0)
    }
}

impl BitOrAssign for Severity {
    fn bitor_assign(&mut self, rhs: Severity) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Severity {
    type Output = Severity;

    fn bitand(self, rhs: Severity) -> Severity {
        Severity(self.0 & rhs.0)
    }
}

impl Not for Severity {
    type Output = Severity;

    fn not(self) -> Severity {
        Severity(!self.0)
    }
}

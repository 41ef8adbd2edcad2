use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::NmeaError;

/// Sentence types that have a field parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentenceKind {
    Gga,
    Gll,
    Vtg,
    Rmc,
}

impl SentenceKind {
    pub const ALL: [SentenceKind; 4] = [
        SentenceKind::Gga,
        SentenceKind::Gll,
        SentenceKind::Vtg,
        SentenceKind::Rmc,
    ];

    /// Talker + type code as it appears after `$`.
    pub fn code(self) -> &'static str {
        match self {
            SentenceKind::Gga => "GPGGA",
            SentenceKind::Gll => "GPGLL",
            SentenceKind::Vtg => "GPVTG",
            SentenceKind::Rmc => "GPRMC",
        }
    }

    /// Exact, case-sensitive match on the five character code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.code() == code)
    }

    pub fn short_name(self) -> &'static str {
        &self.code()[2..]
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseOutcome {
    /// Every field the sentence type carries was applied.
    Applied,
    /// Some fields were missing or malformed and kept their previous value.
    PartiallyApplied,
    /// Valid sentence with no parser; the record was not touched.
    Unsupported,
}

/// Outcome of one parse together with what went wrong field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseReport {
    pub kind: Option<SentenceKind>,
    pub outcome: ParseOutcome,
    pub field_errors: Vec<NmeaError>,
}

impl ParseReport {
    pub fn unsupported() -> Self {
        Self {
            kind: None,
            outcome: ParseOutcome::Unsupported,
            field_errors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_lookup_is_exact() {
        assert_eq!(SentenceKind::from_code("GPGGA"), Some(SentenceKind::Gga));
        assert_eq!(SentenceKind::from_code("GPRMC"), Some(SentenceKind::Rmc));
        assert_eq!(SentenceKind::from_code("GNGGA"), None);
        assert_eq!(SentenceKind::from_code("gpgga"), None);
        assert_eq!(SentenceKind::from_code("GPGSA"), None);
        assert_eq!(SentenceKind::from_code("GPGGAX"), None);
    }

    #[test]
    fn test_every_kind_round_trips_its_code() {
        for kind in SentenceKind::ALL {
            assert_eq!(SentenceKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(SentenceKind::Vtg.to_string(), "VTG");
    }
}

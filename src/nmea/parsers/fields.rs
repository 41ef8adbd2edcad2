use crate::nmea::coordinate::{normalize_checked, Axis, Hemisphere};
use crate::nmea::fix_record::{FixDate, FixRecord, FixTime};
use crate::nmea::sentence::{ParseOutcome, ParseReport, SentenceKind};
use crate::utils::error::NmeaError;

/// Comma separated fields of a sentence body; index 0 is the type code.
pub struct Fields<'a> {
    values: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a str) -> Self {
        Self {
            values: body.split(',').collect(),
        }
    }

    pub fn code(&self) -> &'a str {
        self.values.first().copied().unwrap_or_default()
    }

    /// Empty and absent fields are both `None`.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).copied().filter(|value| !value.is_empty())
    }
}

/// Collects field failures while a parser works through a sentence.
pub struct FieldReport {
    kind: SentenceKind,
    errors: Vec<NmeaError>,
}

impl FieldReport {
    pub fn new(kind: SentenceKind) -> Self {
        Self {
            kind,
            errors: Vec::new(),
        }
    }

    /// A field the sentence type is expected to carry. Missing or malformed
    /// values are recorded and `None` is returned so the caller leaves the
    /// record alone.
    pub fn required<T>(
        &mut self,
        fields: &Fields<'_>,
        index: usize,
        name: &'static str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        match fields.get(index) {
            None => {
                self.fail(name, "missing".to_string());
                None
            }
            Some(value) => self.parse_value(name, value, parse),
        }
    }

    /// A field receivers routinely leave empty. Absence is not an error,
    /// a malformed value still is.
    pub fn optional<T>(
        &mut self,
        fields: &Fields<'_>,
        index: usize,
        name: &'static str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let value = fields.get(index)?;
        self.parse_value(name, value, parse)
    }

    pub fn fail(&mut self, field: &'static str, reason: String) {
        self.errors.push(NmeaError::FieldParse {
            sentence: self.kind.short_name(),
            field,
            reason,
        });
    }

    pub fn into_report(self) -> ParseReport {
        let outcome = if self.errors.is_empty() {
            ParseOutcome::Applied
        } else {
            ParseOutcome::PartiallyApplied
        };
        ParseReport {
            kind: Some(self.kind),
            outcome,
            field_errors: self.errors,
        }
    }

    fn parse_value<T>(
        &mut self,
        name: &'static str,
        value: &str,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(reason) => {
                self.fail(name, format!("{:?}: {}", value, reason));
                None
            }
        }
    }
}

/// Reads a raw coordinate at `index` and its hemisphere at `index + 1`, and
/// writes raw value, hemisphere and normalized degrees together or not at all.
pub fn apply_coordinate(
    report: &mut FieldReport,
    fields: &Fields<'_>,
    index: usize,
    axis: Axis,
    record: &mut FixRecord,
) {
    let (name, hemisphere_name) = match axis {
        Axis::Latitude => ("latitude", "latitude_hemisphere"),
        Axis::Longitude => ("longitude", "longitude_hemisphere"),
    };

    let raw = report.required(fields, index, name, parse_f64);
    let hemisphere = report.required(fields, index + 1, hemisphere_name, parse_hemisphere);
    let (Some(raw), Some(hemisphere)) = (raw, hemisphere) else {
        return;
    };

    match normalize_checked(raw, hemisphere, axis) {
        Ok(degrees) => match axis {
            Axis::Latitude => {
                record.latitude_raw = Some(raw);
                record.latitude_hemisphere = Some(hemisphere);
                record.latitude = Some(degrees);
            }
            Axis::Longitude => {
                record.longitude_raw = Some(raw);
                record.longitude_hemisphere = Some(hemisphere);
                record.longitude = Some(degrees);
            }
        },
        Err(reason) => report.fail(name, reason),
    }
}

fn digits(value: &str) -> Result<u8, String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected digits".to_string());
    }
    value.parse::<u8>().map_err(|e| e.to_string())
}

/// `hhmmss` with an optional fraction, kept to millisecond precision.
pub fn parse_time(value: &str) -> Result<FixTime, String> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    if whole.len() != 6 || !whole.is_ascii() {
        return Err("expected hhmmss".to_string());
    }

    let hour = digits(&whole[0..2])?;
    let minute = digits(&whole[2..4])?;
    let second = digits(&whole[4..6])?;
    if hour > 23 || minute > 59 || second > 59 {
        return Err("time component out of range".to_string());
    }

    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected digits after '.'".to_string());
    }
    let millisecond = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(3)
        .fold(0u16, |acc, b| acc * 10 + (b - b'0') as u16);

    Ok(FixTime {
        hour,
        minute,
        second,
        millisecond,
    })
}

/// `ddmmyy`.
pub fn parse_date(value: &str) -> Result<FixDate, String> {
    if value.len() != 6 || !value.is_ascii() {
        return Err("expected ddmmyy".to_string());
    }

    let day = digits(&value[0..2])?;
    let month = digits(&value[2..4])?;
    let year = digits(&value[4..6])?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err("date component out of range".to_string());
    }

    Ok(FixDate { day, month, year })
}

pub fn parse_f64(value: &str) -> Result<f64, String> {
    let parsed = value.parse::<f64>().map_err(|e| e.to_string())?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err("not a finite number".to_string())
    }
}

pub fn parse_u8(value: &str) -> Result<u8, String> {
    digits(value)
}

pub fn parse_char(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Ok(c),
        _ => Err("expected a single character".to_string()),
    }
}

pub fn parse_hemisphere(value: &str) -> Result<Hemisphere, String> {
    let c = parse_char(value)?;
    Hemisphere::from_char(c).ok_or_else(|| format!("unknown hemisphere {:?}", c))
}

/// `A` (active) or `V` (void).
pub fn parse_status(value: &str) -> Result<char, String> {
    match parse_char(value)? {
        c @ ('A' | 'V') => Ok(c),
        c => Err(format!("unknown status {:?}", c)),
    }
}

/// Single GGA quality digit.
pub fn parse_quality(value: &str) -> Result<u8, String> {
    if value.len() != 1 {
        return Err("expected a single digit".to_string());
    }
    digits(value)
}

pub fn parse_mode(value: &str) -> Result<char, String> {
    let c = parse_char(value)?;
    if c.is_ascii_uppercase() {
        Ok(c)
    } else {
        Err(format!("unknown mode {:?}", c))
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Upper case only, like every other indicator letter on the wire.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }

    fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Converts `DDMM.MMMM` / `DDDMM.MMMM` into signed decimal degrees.
///
/// Whole degrees are the raw value divided by 100 and truncated; the remainder
/// is minutes. South and west are negative.
pub fn normalize(raw: f64, hemisphere: Hemisphere) -> f64 {
    let degrees = (raw / 100.0).trunc();
    let minutes = raw - degrees * 100.0;
    let decimal_degrees = degrees + minutes / 60.0;

    if hemisphere.is_negative() {
        -decimal_degrees
    } else {
        decimal_degrees
    }
}

/// [`normalize`] plus the checks a parser needs before trusting the result:
/// the hemisphere must belong to `axis`, and the result must be in range.
pub fn normalize_checked(raw: f64, hemisphere: Hemisphere, axis: Axis) -> Result<f64, String> {
    if hemisphere.axis() != axis {
        return Err(format!("hemisphere {} is not valid for {:?}", hemisphere, axis));
    }
    if !raw.is_finite() || raw < 0.0 {
        return Err(format!("raw value {} is not a positive degree-minute value", raw));
    }

    let value = normalize(raw, hemisphere);
    if value.abs() > axis.limit() {
        return Err(format!("{:.5} is outside ±{}", value, axis.limit()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_north() {
        let value = normalize(4807.038, Hemisphere::North);
        assert!((value - 48.11730).abs() < 1e-4, "got {}", value);
    }

    #[test]
    fn test_normalize_west() {
        let value = normalize(12311.12, Hemisphere::West);
        assert!((value - (-123.18533)).abs() < 1e-4, "got {}", value);
    }

    #[test]
    fn test_normalize_south_and_zero() {
        assert!((normalize(3352.000, Hemisphere::South) - (-33.86667)).abs() < 1e-4);
        assert_eq!(normalize(0.0, Hemisphere::East), 0.0);
    }

    #[test]
    fn test_hemisphere_parsing() {
        assert_eq!(Hemisphere::from_char('N'), Some(Hemisphere::North));
        assert_eq!(Hemisphere::from_char('n'), None);
        assert_eq!(Hemisphere::from_char('W'), Some(Hemisphere::West));
        assert_eq!(Hemisphere::from_char('X'), None);
        assert_eq!(Hemisphere::South.axis(), Axis::Latitude);
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert!(normalize_checked(9100.0, Hemisphere::North, Axis::Latitude).is_err());
        assert!(normalize_checked(18100.0, Hemisphere::East, Axis::Longitude).is_err());
        assert!(normalize_checked(-100.0, Hemisphere::East, Axis::Longitude).is_err());
        assert!(normalize_checked(9000.0, Hemisphere::South, Axis::Latitude).is_ok());
    }

    #[test]
    fn test_checked_rejects_wrong_axis() {
        assert!(normalize_checked(4807.038, Hemisphere::East, Axis::Latitude).is_err());
        assert!(normalize_checked(1131.0, Hemisphere::North, Axis::Longitude).is_err());
    }
}

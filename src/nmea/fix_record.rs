use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::coordinate::Hemisphere;

/// UTC time of day as reported by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl FixTime {
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_milli_opt(
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
            self.millisecond as u32,
        )
    }
}

impl fmt::Display for FixTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}.{:03}", self.hour, self.minute, self.second, self.millisecond)
    }
}

/// UTC date with the two-digit year NMEA transmits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixDate {
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl FixDate {
    /// Two-digit years below 80 are taken as 20xx.
    pub fn full_year(&self) -> i32 {
        if self.year < 80 {
            2000 + self.year as i32
        } else {
            1900 + self.year as i32
        }
    }

    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.full_year(), self.month as u32, self.day as u32)
    }
}

impl fmt::Display for FixDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.full_year(), self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixMode {
    Autonomous,
    Dgps,
    DeadReckoning,
    Unknown,
}

impl FixMode {
    /// GGA quality digit: 1 GPS, 2 DGPS, 6 estimated.
    pub fn from_quality(code: u8) -> Self {
        match code {
            1 => FixMode::Autonomous,
            2 => FixMode::Dgps,
            6 => FixMode::DeadReckoning,
            _ => FixMode::Unknown,
        }
    }

    /// NMEA 2.3 mode indicator carried by GLL, VTG and RMC.
    pub fn from_indicator(c: char) -> Self {
        match c {
            'A' => FixMode::Autonomous,
            'D' => FixMode::Dgps,
            'E' => FixMode::DeadReckoning,
            _ => FixMode::Unknown,
        }
    }
}

impl fmt::Display for FixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FixMode::Autonomous => "Autonomous",
            FixMode::Dgps => "DGPS",
            FixMode::DeadReckoning => "Dead reckoning",
            FixMode::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// The navigation record the parsers update in place.
///
/// Every field starts unset. A sentence only writes the fields it carries;
/// everything else keeps whatever an earlier sentence left there.
///
/// Serialize-only, so `fix` is never set except by `apply_quality` and
/// `apply_status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FixRecord {
    pub time: Option<FixTime>,
    pub date: Option<FixDate>,

    // Raw DDMM.MMMM / DDDMM.MMMM as received
    pub latitude_raw: Option<f64>,
    pub latitude_hemisphere: Option<Hemisphere>,
    pub longitude_raw: Option<f64>,
    pub longitude_hemisphere: Option<Hemisphere>,

    // Signed decimal degrees
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub altitude: Option<f64>,

    pub speed_knots: Option<f64>,
    pub speed_kmh: Option<f64>,
    pub true_course: Option<f64>,
    pub magnetic_course: Option<f64>,
    pub true_marker: Option<char>,
    pub magnetic_marker: Option<char>,
    pub magnetic_variation: Option<f64>,
    pub magnetic_variation_direction: Option<Hemisphere>,

    fix: Option<bool>,
    pub mode: Option<FixMode>,
    pub satellites: Option<u8>,
}

impl FixRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the receiver reported a usable solution, as of the most recent
    /// status or quality indicator. `None` until one has been seen.
    pub fn fix(&self) -> Option<bool> {
        self.fix
    }

    pub fn has_fix(&self) -> bool {
        self.fix.unwrap_or(false)
    }

    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// GGA quality digit; 1 and 2 count as a fix.
    pub fn apply_quality(&mut self, code: u8) {
        self.fix = Some(matches!(code, 1 | 2));
        self.mode = Some(FixMode::from_quality(code));
    }

    /// GLL / RMC status letter; only `A` counts as a fix.
    pub fn apply_status(&mut self, status: char) {
        self.fix = Some(status == 'A');
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = self.date?.to_naive_date()?;
        let time = self.time?.to_naive_time()?;
        Some(date.and_time(time))
    }
}

impl fmt::Display for FixRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => writeln!(f, "Time: {}", time)?,
            None => writeln!(f, "Time: --:--:--.---")?,
        }
        if let Some(date) = self.date {
            writeln!(f, "Date: {}", date)?;
        }
        if let (Some(lat), Some(hemisphere)) = (self.latitude, self.latitude_hemisphere) {
            writeln!(f, "Latitude: {:.6} {}", lat, hemisphere)?;
        }
        if let (Some(lon), Some(hemisphere)) = (self.longitude, self.longitude_hemisphere) {
            writeln!(f, "Longitude: {:.6} {}", lon, hemisphere)?;
        }
        if let Some(alt) = self.altitude {
            writeln!(f, "Altitude: {:.1}m", alt)?;
        }
        if let Some(speed) = self.speed_knots {
            writeln!(f, "Speed: {:.2} knots", speed)?;
        }
        if let Some(speed) = self.speed_kmh {
            writeln!(f, "Speed: {:.2} km/h", speed)?;
        }
        if let Some(course) = self.true_course {
            writeln!(f, "Course: {:.2}°", course)?;
        }
        if let Some(sats) = self.satellites {
            writeln!(f, "Satellites: {}", sats)?;
        }
        if let Some(mode) = self.mode {
            writeln!(f, "Mode: {}", mode)?;
        }
        write!(f, "Fix: {}", if self.has_fix() { "Yes" } else { "No" })
    }
}

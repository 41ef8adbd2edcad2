//! `$GPGGA` fix data.
//!
//! ```text
//! $GPGGA,hhmmss.ss,llll.ll,a,yyyyy.yy,a,q,nn,h.h,a.a,M,g.g,M,age,sid*hh
//!        1         2       3 4        5 6 7  8   9   10 ...
//! ```

use super::fields::{apply_coordinate, parse_f64, parse_quality, parse_time, parse_u8, FieldReport, Fields};
use crate::nmea::coordinate::Axis;
use crate::nmea::fix_record::FixRecord;
use crate::nmea::sentence::SentenceKind;

pub fn parse(fields: &Fields<'_>, record: &mut FixRecord) -> FieldReport {
    let mut report = FieldReport::new(SentenceKind::Gga);

    if let Some(time) = report.required(fields, 1, "utc_time", parse_time) {
        record.time = Some(time);
    }
    apply_coordinate(&mut report, fields, 2, Axis::Latitude, record);
    apply_coordinate(&mut report, fields, 4, Axis::Longitude, record);

    if let Some(quality) = report.required(fields, 6, "fix_quality", parse_quality) {
        record.apply_quality(quality);
    }
    if let Some(satellites) = report.required(fields, 7, "satellites", parse_u8) {
        record.satellites = Some(satellites);
    }
    // HDOP (8), geoid separation (11) and DGPS age (13) are not kept
    if let Some(altitude) = report.optional(fields, 9, "altitude", parse_f64) {
        record.altitude = Some(altitude);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::fix_record::{FixMode, FixTime};
    use crate::nmea::sentence::ParseOutcome;

    fn run(body: &str, record: &mut FixRecord) -> ParseOutcome {
        parse(&Fields::new(body), record).into_report().outcome
    }

    #[test]
    fn test_reference_sentence() {
        let mut record = FixRecord::new();
        let outcome = run("GPGGA,123519,4807.038,N,01131.000,E,1,08,,,,,,", &mut record);

        assert_eq!(outcome, ParseOutcome::Applied);
        assert_eq!(record.time, Some(FixTime { hour: 12, minute: 35, second: 19, millisecond: 0 }));
        assert!((record.latitude.unwrap() - 48.1173).abs() < 1e-4);
        assert!((record.longitude.unwrap() - 11.5167).abs() < 1e-4);
        assert_eq!(record.fix(), Some(true));
        assert_eq!(record.mode, Some(FixMode::Autonomous));
        assert_eq!(record.satellites, Some(8));
        assert_eq!(record.altitude, None);
    }

    #[test]
    fn test_altitude_and_fraction() {
        let mut record = FixRecord::new();
        run("GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,", &mut record);

        assert_eq!(record.altitude, Some(61.7));
        assert!((record.longitude.unwrap() - (-6.50562)).abs() < 1e-4);
    }

    #[test]
    fn test_no_fix_sentence_keeps_previous_position() {
        let mut record = FixRecord::new();
        run("GPGGA,123519,4807.038,N,01131.000,E,1,08,,,,,,", &mut record);

        let outcome = run("GPGGA,,,,,,0,00,,,,,,,", &mut record);
        assert_eq!(outcome, ParseOutcome::PartiallyApplied);
        assert_eq!(record.fix(), Some(false));
        assert_eq!(record.satellites, Some(0));
        assert!((record.latitude.unwrap() - 48.1173).abs() < 1e-4);
        assert_eq!(record.time.map(|t| t.hour), Some(12));
    }

    #[test]
    fn test_missing_quality_does_not_touch_fix() {
        let mut record = FixRecord::new();
        let outcome = run("GPGGA,123519,4807.038,N,01131.000,E,,08,,,,,,", &mut record);
        assert_eq!(outcome, ParseOutcome::PartiallyApplied);
        assert_eq!(record.fix(), None);
        assert_eq!(record.mode, None);
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let mut record = FixRecord::new();
        let outcome = run("GPGGA,123519,9100.000,N,01131.000,E,6,08,,,,,,", &mut record);
        assert_eq!(outcome, ParseOutcome::PartiallyApplied);
        assert_eq!(record.latitude, None);
        assert_eq!(record.latitude_raw, None);
        assert!(record.longitude.is_some());
        assert_eq!(record.mode, Some(FixMode::DeadReckoning));
        assert_eq!(record.fix(), Some(false));
    }
}

//! `$GPGLL` geographic position.
//!
//! ```text
//! $GPGLL,llll.ll,a,yyyyy.yy,a,hhmmss.ss,A,m*hh
//!        1       2 3        4 5         6 7
//! ```

use super::fields::{apply_coordinate, parse_mode, parse_status, parse_time, FieldReport, Fields};
use crate::nmea::coordinate::Axis;
use crate::nmea::fix_record::{FixMode, FixRecord};
use crate::nmea::sentence::SentenceKind;

pub fn parse(fields: &Fields<'_>, record: &mut FixRecord) -> FieldReport {
    let mut report = FieldReport::new(SentenceKind::Gll);

    apply_coordinate(&mut report, fields, 1, Axis::Latitude, record);
    apply_coordinate(&mut report, fields, 3, Axis::Longitude, record);

    if let Some(time) = report.required(fields, 5, "utc_time", parse_time) {
        record.time = Some(time);
    }
    if let Some(status) = report.required(fields, 6, "status", parse_status) {
        record.apply_status(status);
    }
    if let Some(mode) = report.required(fields, 7, "mode", parse_mode) {
        record.mode = Some(FixMode::from_indicator(mode));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::sentence::ParseOutcome;

    fn run(body: &str, record: &mut FixRecord) -> ParseOutcome {
        parse(&Fields::new(body), record).into_report().outcome
    }

    #[test]
    fn test_active_status_sets_fix() {
        let mut record = FixRecord::new();
        let outcome = run("GPGLL,4916.45,N,12311.12,W,225444,A,A", &mut record);

        assert_eq!(outcome, ParseOutcome::Applied);
        assert_eq!(record.fix(), Some(true));
        assert_eq!(record.mode, Some(FixMode::Autonomous));
        assert!((record.latitude.unwrap() - 49.27417).abs() < 1e-4);
        assert!((record.longitude.unwrap() - (-123.18533)).abs() < 1e-4);
        assert_eq!(record.time.map(|t| (t.hour, t.minute, t.second)), Some((22, 54, 44)));
    }

    #[test]
    fn test_void_status_clears_fix() {
        let mut record = FixRecord::new();
        run("GPGLL,4916.45,N,12311.12,W,225444,A,A", &mut record);
        run("GPGLL,4916.45,N,12311.12,W,225444,V,N", &mut record);

        assert_eq!(record.fix(), Some(false));
        assert_eq!(record.mode, Some(FixMode::Unknown));
    }

    #[test]
    fn test_pre_2_3_sentence_without_mode_is_partial() {
        let mut record = FixRecord::new();
        let outcome = run("GPGLL,4916.45,N,12311.12,W,225444,A", &mut record);

        assert_eq!(outcome, ParseOutcome::PartiallyApplied);
        assert_eq!(record.fix(), Some(true));
        assert_eq!(record.mode, None);
    }

    #[test]
    fn test_lowercase_hemisphere_is_rejected() {
        let mut record = FixRecord::new();
        let outcome = run("GPGLL,4916.45,n,12311.12,W,225444,A,A", &mut record);

        assert_eq!(outcome, ParseOutcome::PartiallyApplied);
        assert_eq!(record.latitude, None);
        assert_eq!(record.latitude_hemisphere, None);
        assert!(record.longitude.is_some());
    }
}

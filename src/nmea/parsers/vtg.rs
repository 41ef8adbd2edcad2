//! `$GPVTG` course and speed over ground.
//!
//! ```text
//! $GPVTG,ttt.t,T,mmm.m,M,sss.s,N,kkk.k,K,m*hh
//!        1     2 3     4 5     6 7     8 9
//! ```
//!
//! Carries no time, position or status, so `fix` is left alone.

use super::fields::{parse_char, parse_f64, parse_mode, FieldReport, Fields};
use crate::nmea::fix_record::{FixMode, FixRecord};
use crate::nmea::sentence::SentenceKind;

pub fn parse(fields: &Fields<'_>, record: &mut FixRecord) -> FieldReport {
    let mut report = FieldReport::new(SentenceKind::Vtg);

    if let Some(course) = report.required(fields, 1, "true_course", parse_f64) {
        record.true_course = Some(course);
    }
    if let Some(marker) = report.optional(fields, 2, "true_marker", parse_char) {
        record.true_marker = Some(marker);
    }
    if let Some(course) = report.optional(fields, 3, "magnetic_course", parse_f64) {
        record.magnetic_course = Some(course);
    }
    if let Some(marker) = report.optional(fields, 4, "magnetic_marker", parse_char) {
        record.magnetic_marker = Some(marker);
    }
    if let Some(speed) = report.required(fields, 5, "speed_knots", parse_f64) {
        record.speed_knots = Some(speed);
    }
    if let Some(speed) = report.required(fields, 7, "speed_kmh", parse_f64) {
        record.speed_kmh = Some(speed);
    }
    if let Some(mode) = report.required(fields, 9, "mode", parse_mode) {
        record.mode = Some(FixMode::from_indicator(mode));
    }

    report
}

//! `$GPRMC` recommended minimum data.
//!
//! ```text
//! $GPRMC,hhmmss.ss,A,llll.ll,a,yyyyy.yy,a,x.x,x.x,ddmmyy,x.x,a,m*hh
//!        1         2 3       4 5        6 7   8   9      10  11 12
//! ```

use super::fields::{
    apply_coordinate, parse_date, parse_f64, parse_hemisphere, parse_mode, parse_status, parse_time,
    FieldReport, Fields,
};
use crate::nmea::coordinate::{Axis, Hemisphere};
use crate::nmea::fix_record::{FixMode, FixRecord};
use crate::nmea::sentence::SentenceKind;

pub fn parse(fields: &Fields<'_>, record: &mut FixRecord) -> FieldReport {
    let mut report = FieldReport::new(SentenceKind::Rmc);

    if let Some(time) = report.required(fields, 1, "utc_time", parse_time) {
        record.time = Some(time);
    }
    if let Some(status) = report.required(fields, 2, "status", parse_status) {
        record.apply_status(status);
    }
    apply_coordinate(&mut report, fields, 3, Axis::Latitude, record);
    apply_coordinate(&mut report, fields, 5, Axis::Longitude, record);

    if let Some(speed) = report.required(fields, 7, "speed_knots", parse_f64) {
        record.speed_knots = Some(speed);
    }
    if let Some(course) = report.required(fields, 8, "true_course", parse_f64) {
        record.true_course = Some(course);
    }
    if let Some(date) = report.required(fields, 9, "utc_date", parse_date) {
        record.date = Some(date);
    }

    let variation = report.optional(fields, 10, "magnetic_variation", parse_f64);
    let direction = report.optional(fields, 11, "magnetic_variation_direction", parse_hemisphere);
    match (variation, direction) {
        (Some(variation), Some(direction @ (Hemisphere::East | Hemisphere::West))) => {
            record.magnetic_variation = Some(variation);
            record.magnetic_variation_direction = Some(direction);
        }
        (Some(_), Some(direction)) => {
            report.fail("magnetic_variation_direction", format!("{} is not east or west", direction));
        }
        (Some(_), None) => report.fail("magnetic_variation_direction", "missing".to_string()),
        (None, Some(_)) => report.fail("magnetic_variation", "missing".to_string()),
        (None, None) => {}
    }

    if let Some(mode) = report.required(fields, 12, "mode", parse_mode) {
        record.mode = Some(FixMode::from_indicator(mode));
    }

    report
}

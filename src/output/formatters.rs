use chrono::Utc;

use crate::nmea::fix_record::FixRecord;
use crate::nmea::sentence::SentenceKind;
use crate::services::pipeline::PipelineStats;

pub trait ReportFormatter: Send + Sync {
    /// Renders the record as it stands right after `kind` was applied.
    fn format_update(&self, kind: SentenceKind, record: &FixRecord) -> String;
    fn format_summary(&self, stats: &PipelineStats) -> String;
    fn format_header(&self) -> String;
}

/// Maps a configured format name to its formatter; unknown names fall back
/// to the console layout.
pub fn formatter_for(name: &str) -> Box<dyn ReportFormatter> {
    match name {
        "json" => Box::new(JsonFormatter),
        "csv" => Box::new(CsvFormatter),
        _ => Box::new(ConsoleFormatter),
    }
}

pub struct ConsoleFormatter;

impl ReportFormatter for ConsoleFormatter {
    fn format_update(&self, kind: SentenceKind, record: &FixRecord) -> String {
        let mut output = format!("🛰️  {} update:\n", kind);
        output.push_str(&record.to_string());
        output.push('\n');
        output.push_str(&"-".repeat(30));
        output
    }

    fn format_summary(&self, stats: &PipelineStats) -> String {
        format!("📊 Stream summary: {}", stats)
    }

    fn format_header(&self) -> String {
        format!("🚀 NMEA Fix Monitor - {}\n", Utc::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_update(&self, kind: SentenceKind, record: &FixRecord) -> String {
        let json_data = serde_json::json!({
            "sentence": kind.code(),
            "timestamp": Utc::now().to_rfc3339(),
            "fix": record.fix(),
            "record": record,
        });

        serde_json::to_string(&json_data).unwrap_or_default()
    }

    fn format_summary(&self, stats: &PipelineStats) -> String {
        let json_data = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "summary": stats,
        });

        serde_json::to_string(&json_data).unwrap_or_default()
    }

    fn format_header(&self) -> String {
        String::new() // one object per line, no header
    }
}

pub struct CsvFormatter;

fn csv_value<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ReportFormatter for CsvFormatter {
    fn format_update(&self, kind: SentenceKind, record: &FixRecord) -> String {
        let fix = match record.fix() {
            Some(true) => "1",
            Some(false) => "0",
            None => "",
        };

        [
            kind.short_name().to_string(),
            csv_value(record.date),
            csv_value(record.time),
            csv_value(record.latitude.map(|v| format!("{:.6}", v))),
            csv_value(record.longitude.map(|v| format!("{:.6}", v))),
            csv_value(record.altitude),
            csv_value(record.speed_knots),
            csv_value(record.speed_kmh),
            csv_value(record.true_course),
            csv_value(record.satellites),
            fix.to_string(),
            csv_value(record.mode),
        ]
        .join(",")
    }

    fn format_summary(&self, stats: &PipelineStats) -> String {
        format!(
            "# bytes={},lines={},applied={},partial={},unsupported={},dropped={},overflows={}",
            stats.bytes,
            stats.lines,
            stats.applied,
            stats.partially_applied,
            stats.unsupported,
            stats.dropped,
            stats.overflows
        )
    }

    fn format_header(&self) -> String {
        "Sentence,Date,Time,Latitude,Longitude,Altitude,SpeedKnots,SpeedKmh,Course,Satellites,Fix,Mode"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::dispatcher::parse;

    fn gga_record() -> FixRecord {
        let mut record = FixRecord::new();
        parse(
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n",
            &mut record,
        );
        record
    }

    #[test]
    fn test_csv_columns_line_up_with_header() {
        let formatter = CsvFormatter;
        let header_columns = formatter.format_header().split(',').count();
        let row = formatter.format_update(SentenceKind::Gga, &gga_record());

        assert_eq!(row.split(',').count(), header_columns);
        assert!(row.starts_with("GGA,,12:35:19.000,48.117300,11.516667,545.4,"));
        assert!(row.ends_with(",8,1,Autonomous"));
    }

    #[test]
    fn test_json_update_carries_record() {
        let line = JsonFormatter.format_update(SentenceKind::Gga, &gga_record());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["sentence"], "GPGGA");
        assert_eq!(value["fix"], true);
        assert_eq!(value["record"]["satellites"], 8);
        assert_eq!(value["record"]["altitude"], 545.4);
    }

    #[test]
    fn test_json_summary() {
        let stats = PipelineStats {
            lines: 3,
            applied: 2,
            dropped: 1,
            ..Default::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_summary(&stats)).unwrap();
        assert_eq!(value["summary"]["applied"], 2);
        assert_eq!(value["summary"]["dropped"], 1);
    }

    #[test]
    fn test_console_update_names_sentence() {
        let text = ConsoleFormatter.format_update(SentenceKind::Gga, &gga_record());
        assert!(text.contains("GGA update"));
        assert!(text.contains("Latitude: 48.117300 N"));
        assert!(text.contains("Fix: Yes"));
    }

    #[test]
    fn test_formatter_for_unknown_name_is_console() {
        assert!(formatter_for("xml").format_header().contains("NMEA Fix Monitor"));
        assert!(formatter_for("csv").format_header().starts_with("Sentence,"));
        assert!(formatter_for("json").format_header().is_empty());
    }
}

use log::debug;
use serde::Serialize;
use std::fmt;

use crate::nmea::dispatcher::parse_detailed;
use crate::nmea::fix_record::FixRecord;
use crate::nmea::framer::SentenceFramer;
use crate::nmea::sentence::{ParseOutcome, SentenceKind};
use crate::nmea::validator::split_frame;
use crate::utils::error::NmeaError;

/// What happened to one framed line.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A supported sentence was applied to the record, fully or in part.
    Updated {
        kind: SentenceKind,
        outcome: ParseOutcome,
        field_errors: Vec<NmeaError>,
    },
    /// A valid sentence nobody parses.
    Unsupported { code: String },
    /// Framing, checksum or overflow failure; nothing was applied.
    Dropped(NmeaError),
}

impl PipelineEvent {
    pub fn updated_kind(&self) -> Option<SentenceKind> {
        match self {
            PipelineEvent::Updated { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Validates one candidate sentence and, if it passes, parses it into `record`.
pub fn process_sentence(sentence: &str, record: &mut FixRecord) -> PipelineEvent {
    let frame = match split_frame(sentence) {
        Ok(frame) => frame,
        Err(e) => {
            debug!("🗑️ Dropped {:?}: {}", sentence.trim_end(), e);
            return PipelineEvent::Dropped(e);
        }
    };

    let report = parse_detailed(sentence, record);
    match report.kind {
        Some(kind) => PipelineEvent::Updated {
            kind,
            outcome: report.outcome,
            field_errors: report.field_errors,
        },
        None => PipelineEvent::Unsupported {
            code: frame.code().to_string(),
        },
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub bytes: u64,
    pub lines: u64,
    pub applied: u64,
    pub partially_applied: u64,
    pub unsupported: u64,
    pub dropped: u64,
    pub overflows: u64,
}

impl PipelineStats {
    pub fn record(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Dropped(NmeaError::BufferOverflow { .. }) => {
                self.overflows += 1;
                return;
            }
            PipelineEvent::Dropped(_) => self.dropped += 1,
            PipelineEvent::Unsupported { .. } => self.unsupported += 1,
            PipelineEvent::Updated { outcome: ParseOutcome::Applied, .. } => self.applied += 1,
            PipelineEvent::Updated { .. } => self.partially_applied += 1,
        }
        self.lines += 1;
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes, {} lines: {} applied, {} partial, {} unsupported, {} dropped, {} overflows",
            self.bytes,
            self.lines,
            self.applied,
            self.partially_applied,
            self.unsupported,
            self.dropped,
            self.overflows
        )
    }
}

/// Bytes in, fix record updates out. Owns the record it writes to.
pub struct NavigationPipeline {
    framer: SentenceFramer,
    record: FixRecord,
    stats: PipelineStats,
}

impl NavigationPipeline {
    pub fn new(capacity: usize) -> Self {
        Self {
            framer: SentenceFramer::with_capacity(capacity),
            record: FixRecord::new(),
            stats: PipelineStats::default(),
        }
    }

    pub fn record(&self) -> &FixRecord {
        &self.record
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Feeds one byte; sentence processing finishes before this returns.
    pub fn push_byte(&mut self, byte: u8) -> Option<PipelineEvent> {
        self.stats.bytes += 1;
        let event = match self.framer.feed(byte)? {
            Ok(sentence) => process_sentence(&sentence, &mut self.record),
            Err(e) => PipelineEvent::Dropped(e),
        };
        self.stats.record(&event);
        Some(event)
    }

    /// Lazily turns a (possibly endless) byte sequence into events.
    pub fn outcomes<I>(&mut self, bytes: I) -> Outcomes<'_, I::IntoIter>
    where
        I: IntoIterator<Item = u8>,
    {
        Outcomes {
            pipeline: self,
            bytes: bytes.into_iter(),
        }
    }
}

impl Default for NavigationPipeline {
    fn default() -> Self {
        Self::new(crate::nmea::framer::DEFAULT_CAPACITY)
    }
}

pub struct Outcomes<'a, I> {
    pipeline: &'a mut NavigationPipeline,
    bytes: I,
}

impl<I> Outcomes<'_, I> {
    /// The record as of the last event returned.
    pub fn record(&self) -> &FixRecord {
        self.pipeline.record()
    }

    pub fn stats(&self) -> &PipelineStats {
        self.pipeline.stats()
    }
}

impl<I: Iterator<Item = u8>> Iterator for Outcomes<'_, I> {
    type Item = PipelineEvent;

    fn next(&mut self) -> Option<PipelineEvent> {
        loop {
            let byte = self.bytes.next()?;
            if let Some(event) = self.pipeline.push_byte(byte) {
                return Some(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::checksum::frame_sentence;
    use crate::utils::error::FramingError;

    fn stream(bodies: &[&str]) -> Vec<u8> {
        bodies.iter().flat_map(|body| frame_sentence(body).into_bytes()).collect()
    }

    #[test]
    fn test_stream_builds_up_record() {
        let bytes = stream(&[
            "GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,",
            "GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A",
            "GPRMC,123520,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W,A",
        ]);

        let mut pipeline = NavigationPipeline::default();
        let kinds: Vec<SentenceKind> = pipeline
            .outcomes(bytes)
            .filter_map(|event| event.updated_kind())
            .collect();

        assert_eq!(kinds, vec![SentenceKind::Gga, SentenceKind::Vtg, SentenceKind::Rmc]);
        let record = pipeline.record();
        assert_eq!(record.altitude, Some(545.4));
        assert_eq!(record.speed_kmh, Some(10.2));
        assert_eq!(record.speed_knots, Some(22.4));
        assert_eq!(record.time.map(|t| t.second), Some(20));
        assert_eq!(record.satellites, Some(8));
        assert!(record.has_fix());
        assert_eq!(pipeline.stats().applied, 3);
    }

    #[test]
    fn test_bad_sentences_are_dropped_and_stream_continues() {
        let mut bytes = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,,,,,,*00\r\n".to_vec();
        bytes.extend_from_slice(b"garbage\r\n");
        bytes.extend(stream(&["GPGLL,4916.45,N,12311.12,W,225444,A,A"]));

        let mut pipeline = NavigationPipeline::default();
        let events: Vec<PipelineEvent> = pipeline.outcomes(bytes).collect();

        assert_eq!(events.len(), 3);
        assert_eq!(
            events[0],
            PipelineEvent::Dropped(NmeaError::ChecksumMismatch { declared: 0x00, computed: 0x77 })
        );
        assert_eq!(events[1], PipelineEvent::Dropped(FramingError::MissingStart.into()));
        assert_eq!(events[2].updated_kind(), Some(SentenceKind::Gll));
        assert!(pipeline.record().time.is_some());
        assert_eq!(pipeline.stats().dropped, 2);
    }

    #[test]
    fn test_unsupported_sentence_leaves_record_alone() {
        let bytes = stream(&["GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00"]);
        let mut pipeline = NavigationPipeline::default();
        let events: Vec<PipelineEvent> = pipeline.outcomes(bytes).collect();

        assert_eq!(events, vec![PipelineEvent::Unsupported { code: "GPGSV".to_string() }]);
        assert_eq!(pipeline.record(), &FixRecord::new());
    }

    #[test]
    fn test_overflow_then_recovery() {
        let mut bytes = vec![b'$'; 600];
        bytes.extend_from_slice(b"\r\n");
        bytes.extend(stream(&["GPGGA,123519,4807.038,N,01131.000,E,1,08,,,,,,"]));

        let mut pipeline = NavigationPipeline::new(256);
        let events: Vec<PipelineEvent> = pipeline.outcomes(bytes).collect();

        assert_eq!(events[0], PipelineEvent::Dropped(NmeaError::BufferOverflow { capacity: 256 }));
        assert_eq!(events[1].updated_kind(), Some(SentenceKind::Gga));
        assert_eq!(events.len(), 2);
        assert_eq!(pipeline.stats().overflows, 1);
        assert_eq!(pipeline.record().satellites, Some(8));
    }

    #[test]
    fn test_outcomes_is_lazy_over_endless_input() {
        let sentence = frame_sentence("GPGLL,4916.45,N,12311.12,W,225444,A,A").into_bytes();
        let endless = sentence.into_iter().cycle();

        let mut pipeline = NavigationPipeline::default();
        let taken: Vec<PipelineEvent> = pipeline.outcomes(endless).take(5).collect();

        assert_eq!(taken.len(), 5);
        assert_eq!(pipeline.stats().applied, 5);
    }

    #[test]
    fn test_partial_outcome_is_reported() {
        let bytes = stream(&["GPGGA,,,,,,0,00,,,,,,,"]);
        let mut pipeline = NavigationPipeline::default();
        let events: Vec<PipelineEvent> = pipeline.outcomes(bytes).collect();

        match &events[0] {
            PipelineEvent::Updated { kind, outcome, field_errors } => {
                assert_eq!(*kind, SentenceKind::Gga);
                assert_eq!(*outcome, ParseOutcome::PartiallyApplied);
                assert!(!field_errors.is_empty());
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(pipeline.record().fix(), Some(false));
        assert_eq!(pipeline.stats().partially_applied, 1);
    }
}

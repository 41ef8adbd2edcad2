//! NMEA 0183 navigation-fix reader
//!
//! Frames a byte stream from a GPS receiver into sentences, validates their
//! checksums and folds GGA, GLL, VTG and RMC content into a single
//! [`FixRecord`] describing the current position, motion, time and fix state.

pub mod cli;
pub mod config;
pub mod devices;
pub mod nmea;
pub mod output;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use devices::{ByteSource, ReplaySource, SerialGpsReader};
pub use nmea::{parse, validate, FixRecord, ParseOutcome, SentenceFramer, SentenceKind};
pub use output::{ReportFormatter, ReportSender, Reporter};
pub use services::{GpsService, NavigationPipeline, PipelineEvent, PipelineStats};
pub use utils::error::{FramingError, GpsError, NmeaError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

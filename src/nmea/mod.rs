//! NMEA 0183 core: framing, checksum validation, dispatch, field parsing and
//! coordinate normalization.

pub mod checksum;
pub mod coordinate;
pub mod dispatcher;
pub mod fix_record;
pub mod framer;
pub mod parsers;
pub mod sentence;
pub mod validator;

pub use checksum::{frame_sentence, xor_fold};
pub use coordinate::{normalize, Axis, Hemisphere};
pub use dispatcher::{parse, parse_detailed};
pub use fix_record::{FixDate, FixMode, FixRecord, FixTime};
pub use framer::{SentenceFramer, DEFAULT_CAPACITY};
pub use sentence::{ParseOutcome, ParseReport, SentenceKind};
pub use validator::{check, validate};

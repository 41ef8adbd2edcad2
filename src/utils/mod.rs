pub mod error;

pub use error::{FramingError, GpsError, NmeaError};

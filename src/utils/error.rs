use thiserror::Error;

/// Shape problems with a candidate sentence, found before the checksum is compared.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FramingError {
    #[error("sentence does not start with '$'")]
    MissingStart,

    #[error("sentence does not end with CR LF")]
    MissingTerminator,

    #[error("no '*' checksum delimiter")]
    MissingChecksumDelimiter,

    #[error("more than one '*' checksum delimiter")]
    MultipleChecksumDelimiters,

    #[error("malformed checksum digits: {0:?}")]
    MalformedChecksum(String),

    #[error("line contains non-ASCII bytes")]
    NonAscii,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NmeaError {
    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("Checksum mismatch: declared 0x{declared:02X}, computed 0x{computed:02X}")]
    ChecksumMismatch { declared: u8, computed: u8 },

    #[error("Sentence exceeded the {capacity} byte buffer before a terminator")]
    BufferOverflow { capacity: usize },

    #[error("Unsupported sentence type: {0}")]
    UnsupportedSentenceType(String),

    #[error("{sentence} field '{field}': {reason}")]
    FieldParse {
        sentence: &'static str,
        field: &'static str,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum GpsError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Communication error: {0}")]
    CommunicationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// No byte arrived within the port timeout; the source is still usable.
    #[error("Read timed out")]
    Timeout,

    #[error("Service not available: {0}")]
    ServiceNotAvailable(String),
}

impl From<serde_json::Error> for GpsError {
    fn from(err: serde_json::Error) -> Self {
        GpsError::SerializationError(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for GpsError {
    fn from(err: toml::de::Error) -> Self {
        GpsError::ConfigError(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for GpsError {
    fn from(err: toml::ser::Error) -> Self {
        GpsError::SerializationError(format!("TOML error: {}", err))
    }
}

impl From<std::io::Error> for GpsError {
    fn from(err: std::io::Error) -> Self {
        GpsError::CommunicationError(format!("IO error: {}", err))
    }
}

impl From<serialport::Error> for GpsError {
    fn from(err: serialport::Error) -> Self {
        GpsError::ConnectionError(format!("Serial port error: {}", err))
    }
}

use log::info;
use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read};
use std::path::Path;

use crate::devices::traits::ByteSource;
use crate::utils::error::GpsError;

/// Replays recorded receiver output from a file or an in-memory buffer.
pub struct ReplaySource<R: Read> {
    name: String,
    reader: BufReader<R>,
}

impl<R: Read> ReplaySource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader: BufReader::new(reader),
        }
    }
}

impl ReplaySource<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GpsError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| GpsError::ConnectionError(format!("Failed to open {}: {}", path.display(), e)))?;
        info!("📼 Replaying NMEA log {}", path.display());
        Ok(Self::new(path.display().to_string(), file))
    }
}

impl ReplaySource<Cursor<Vec<u8>>> {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new("memory", Cursor::new(bytes.into()))
    }
}

impl<R: Read> ByteSource for ReplaySource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_byte(&mut self) -> Result<Option<u8>, GpsError> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

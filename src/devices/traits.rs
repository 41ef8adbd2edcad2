use log::warn;

use crate::utils::error::GpsError;

/// Where raw receiver bytes come from.
pub trait ByteSource {
    fn name(&self) -> &str;

    /// Waits for the next byte. `Ok(None)` ends a finite source; a live
    /// receiver never returns it and reports `GpsError::Timeout` instead when
    /// the line stays quiet, so callers get a chance to stop.
    fn next_byte(&mut self) -> Result<Option<u8>, GpsError>;

    /// Sends the one-time receiver configuration. Sources that cannot be
    /// written to ignore it.
    fn send_configuration(&mut self, _command: &str) -> Result<(), GpsError> {
        Ok(())
    }

    /// The source as a lazy byte iterator that waits through timeouts and
    /// stops at the end of input or at the first read error.
    fn bytes(&mut self) -> SourceBytes<'_, Self>
    where
        Self: Sized,
    {
        SourceBytes { source: self }
    }
}

pub struct SourceBytes<'a, S: ByteSource> {
    source: &'a mut S,
}

impl<S: ByteSource> Iterator for SourceBytes<'_, S> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        loop {
            match self.source.next_byte() {
                Ok(byte) => return byte,
                Err(GpsError::Timeout) => continue,
                Err(e) => {
                    warn!("⚠️ Read from {} failed: {}", self.source.name(), e);
                    return None;
                }
            }
        }
    }
}

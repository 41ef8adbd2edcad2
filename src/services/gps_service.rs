use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;

use super::pipeline::{process_sentence, PipelineEvent, PipelineStats};
use crate::config::Config;
use crate::devices::{ByteSource, SerialGpsReader};
use crate::nmea::fix_record::FixRecord;
use crate::nmea::framer::SentenceFramer;
use crate::nmea::sentence::{ParseOutcome, SentenceKind};
use crate::utils::error::GpsError;

const RETRY_DELAY: Duration = Duration::from_secs(5);
const PAUSE_STEP: Duration = Duration::from_millis(100);

/// A consistent copy of the record taken right after one sentence was applied.
#[derive(Debug, Clone)]
pub struct FixUpdate {
    pub kind: SentenceKind,
    pub outcome: ParseOutcome,
    pub record: FixRecord,
}

/// Reads a source until it ends, it fails, or `is_running` goes false.
///
/// `is_running` is checked after every sentence and whenever the source
/// times out, so a quiet receiver can still be stopped. The write guard on
/// `record` is held for the whole of one sentence, so readers never see half
/// of an update.
pub fn drive_source<S: ByteSource>(
    source: &mut S,
    capacity: usize,
    record: &RwLock<FixRecord>,
    is_running: &RwLock<bool>,
    updates: &UnboundedSender<FixUpdate>,
) -> PipelineStats {
    let mut framer = SentenceFramer::with_capacity(capacity);
    let mut stats = PipelineStats::default();

    loop {
        let byte = match source.next_byte() {
            Ok(Some(byte)) => byte,
            Ok(None) => break,
            Err(GpsError::Timeout) => {
                if !*is_running.blocking_read() {
                    break;
                }
                continue;
            }
            Err(e) => {
                warn!("⚠️ Read from {} failed: {}", source.name(), e);
                break;
            }
        };

        stats.bytes += 1;
        let Some(framed) = framer.feed(byte) else {
            continue;
        };

        let event = match framed {
            Ok(sentence) => {
                let mut guard = record.blocking_write();
                let event = process_sentence(&sentence, &mut guard);
                if let PipelineEvent::Updated { kind, outcome, .. } = &event {
                    // A closed channel only means nobody is reporting
                    let _ = updates.send(FixUpdate {
                        kind: *kind,
                        outcome: *outcome,
                        record: guard.clone(),
                    });
                }
                event
            }
            Err(e) => PipelineEvent::Dropped(e),
        };
        stats.record(&event);

        if !*is_running.blocking_read() {
            break;
        }
    }

    stats
}

/// Sleeps up to `delay`, waking early once the service is stopped.
fn pause_while_running(is_running: &RwLock<bool>, delay: Duration) {
    let mut waited = Duration::ZERO;
    while waited < delay && *is_running.blocking_read() {
        std::thread::sleep(PAUSE_STEP);
        waited += PAUSE_STEP;
    }
}

#[derive(Clone)]
pub struct GpsService {
    current_data: Arc<RwLock<FixRecord>>,
    is_running: Arc<RwLock<bool>>,
    config: Config,
}

impl GpsService {
    pub fn new(config: Config) -> Self {
        Self {
            current_data: Arc::new(RwLock::new(FixRecord::new())),
            is_running: Arc::new(RwLock::new(false)),
            config,
        }
    }

    /// Starts reading the configured serial port on a blocking task and
    /// returns the stream of record updates.
    pub async fn start(&self) -> Result<UnboundedReceiver<FixUpdate>, GpsError> {
        let mut running = self.is_running.write().await;
        if *running {
            return Err(GpsError::ServiceNotAvailable("GPS service already running".to_string()));
        }
        *running = true;
        drop(running);

        let (tx, rx) = mpsc::unbounded_channel();
        let config = self.config.clone();
        let current_data = self.current_data.clone();
        let is_running = self.is_running.clone();

        tokio::task::spawn_blocking(move || {
            info!("🧭 Starting GPS service on port {} at {} baud", config.serial_port, config.baud_rate);

            while *is_running.blocking_read() {
                match SerialGpsReader::new(&config.serial_port, config.baud_rate, config.timeout_ms) {
                    Ok(mut reader) => {
                        info!("🧭 GPS reader initialized successfully");

                        if let Some(command) = &config.init_command {
                            if let Err(e) = reader.send_configuration(command) {
                                error!("❌ Failed to configure GPS module: {}", e);
                                pause_while_running(&is_running, RETRY_DELAY);
                                continue;
                            }
                        }

                        let stats = drive_source(
                            &mut reader,
                            config.framer_capacity,
                            &current_data,
                            &is_running,
                            &tx,
                        );
                        info!("📊 GPS session ended: {}", stats);
                    }
                    Err(e) => {
                        error!("❌ Failed to initialize GPS reader: {}", e);
                    }
                }

                if tx.is_closed() {
                    warn!("⚠️ No update consumer left, stopping GPS service");
                    break;
                }
                pause_while_running(&is_running, RETRY_DELAY);
            }

            info!("🧭 GPS service stopped");
        });

        Ok(rx)
    }

    /// Stops after the sentence in progress, or after the next read timeout
    /// when the receiver is quiet.
    pub async fn stop(&self) {
        *self.is_running.write().await = false;
        info!("🧭 GPS service stopping...");
    }

    pub async fn get_current_data(&self) -> FixRecord {
        self.current_data.read().await.clone()
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub async fn get_status(&self) -> String {
        let running = self.is_running().await;
        let data = self.get_current_data().await;

        if !running {
            return "🧭 GPS Inactive".to_string();
        }
        match (data.has_fix(), data.latitude, data.longitude) {
            (true, Some(lat), Some(lon)) => format!(
                "🧭 GPS Active - Position: {:.6}°, {:.6}°, Satellites: {}",
                lat,
                lon,
                data.satellites.map_or("?".to_string(), |s| s.to_string())
            ),
            _ => "🧭 GPS Active - Waiting for fix...".to_string(),
        }
    }
}

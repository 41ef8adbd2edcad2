use log::{info, warn};

use super::formatters::{formatter_for, ReportFormatter};
use super::senders::{ConsoleSender, FileSender, ReportSender};
use crate::config::OutputConfig;
use crate::nmea::fix_record::FixRecord;
use crate::nmea::sentence::SentenceKind;
use crate::services::pipeline::PipelineStats;
use crate::utils::error::GpsError;

/// Fans formatted reports out to every configured sender.
pub struct Reporter {
    formatter: Box<dyn ReportFormatter>,
    senders: Vec<Box<dyn ReportSender>>,
}

impl Reporter {
    pub fn new(formatter: Box<dyn ReportFormatter>) -> Self {
        Self {
            formatter,
            senders: Vec::new(),
        }
    }

    /// Console output always; a file as well when one is configured.
    pub async fn from_config(output: &OutputConfig) -> Result<Self, GpsError> {
        info!("🎨 Using {} formatter", output.format);
        let mut reporter = Self::new(formatter_for(&output.format));
        reporter.add_sender(Box::new(ConsoleSender));

        if let Some(path) = &output.file_path {
            let sender = FileSender::new(path, false);
            sender.prepare().await?;
            info!("📝 Adding file output: {}", path);
            reporter.add_sender(Box::new(sender));
        }

        Ok(reporter)
    }

    pub fn add_sender(&mut self, sender: Box<dyn ReportSender>) {
        self.senders.push(sender);
    }

    pub fn senders(&self) -> impl Iterator<Item = &dyn ReportSender> {
        self.senders.iter().map(|s| s.as_ref())
    }

    pub async fn header(&self) {
        let header = self.formatter.format_header();
        if !header.is_empty() {
            self.dispatch(&header).await;
        }
    }

    pub async fn update(&self, kind: SentenceKind, record: &FixRecord) {
        let text = self.formatter.format_update(kind, record);
        self.dispatch(&text).await;
    }

    pub async fn summary(&self, stats: &PipelineStats) {
        let text = self.formatter.format_summary(stats);
        self.dispatch(&text).await;
    }

    // A failing sender is logged and skipped; the rest still get the report.
    async fn dispatch(&self, text: &str) {
        for sender in &self.senders {
            if let Err(e) = sender.send(text).await {
                warn!(
                    "⚠️ {} sender to {} failed: {}",
                    sender.sender_type(),
                    sender.destination(),
                    e
                );
            }
        }
    }
}

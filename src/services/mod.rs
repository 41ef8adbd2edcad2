pub mod gps_service;
pub mod pipeline;

pub use gps_service::{drive_source, FixUpdate, GpsService};
pub use pipeline::{process_sentence, NavigationPipeline, Outcomes, PipelineEvent, PipelineStats};

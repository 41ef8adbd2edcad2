pub mod settings;

pub use settings::{Config, OutputConfig, DEFAULT_INIT_COMMAND};

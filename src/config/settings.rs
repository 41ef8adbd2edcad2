use clap::ArgMatches;
use log::info;
use serde::{Deserialize, Serialize, Serializer};
use std::path::Path;

use crate::nmea::framer::DEFAULT_CAPACITY;
use crate::utils::error::GpsError;

/// Enables GGA, GLL, VTG, RMC (and GSA/GSV) output on MTK receivers.
pub const DEFAULT_INIT_COMMAND: &str = "PMTK314,1,1,1,1,1,5,0,0,0,0,0,0,0,0,0,0,0,0,0";

const MIN_FRAMER_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Connection settings
    pub serial_port: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,

    /// Sent once, framed with its checksum, before streaming starts.
    /// Written as `""` when unset so a reload does not bring the default back.
    #[serde(serialize_with = "serialize_init_command")]
    pub init_command: Option<String>,

    pub framer_capacity: usize,

    pub log_level: String,

    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub file_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            file_path: None,
        }
    }
}

fn serialize_init_command<S: Serializer>(command: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(command.as_deref().unwrap_or_default())
}

impl Default for Config {
    fn default() -> Self {
        let serial_port = if cfg!(target_os = "windows") {
            "COM1"
        } else if cfg!(target_os = "macos") {
            "/dev/tty.usbserial-0001"
        } else {
            "/dev/ttyUSB0"
        };

        Self {
            serial_port: serial_port.to_string(),
            baud_rate: 9600,
            timeout_ms: 1000,
            init_command: Some(DEFAULT_INIT_COMMAND.to_string()),
            framer_capacity: DEFAULT_CAPACITY,
            log_level: "info".to_string(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Loads `--config` if given, then applies the other command line overrides.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, GpsError> {
        let mut config = match matches.get_one::<String>("config") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(port) = matches.get_one::<String>("port") {
            config.serial_port = port.clone();
        }
        if let Some(baud) = matches.get_one::<String>("baud") {
            config.baud_rate = baud
                .parse()
                .map_err(|e| GpsError::ConfigError(format!("Invalid baud rate {:?}: {}", baud, e)))?;
        }
        if let Some(format) = matches.get_one::<String>("format") {
            config.output.format = format.clone();
        }
        if let Some(path) = matches.get_one::<String>("output-file") {
            config.output.file_path = Some(path.clone());
        }
        if let Some(level) = matches.get_one::<String>("log-level") {
            config.log_level = level.clone();
        }
        if matches.get_flag("no-init") {
            config.init_command = None;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GpsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| GpsError::ConfigError(format!("Cannot read {}: {}", path.display(), e)))?;
        let mut config: Config = toml::from_str(&content)?;

        // An empty string in the file means "send nothing"
        if config.init_command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            config.init_command = None;
        }

        info!("⚙️  Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpsError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GpsError> {
        if self.baud_rate == 0 {
            return Err(GpsError::ConfigError("baud_rate must be non-zero".to_string()));
        }
        if self.framer_capacity < MIN_FRAMER_CAPACITY {
            return Err(GpsError::ConfigError(format!(
                "framer_capacity must be at least {}",
                MIN_FRAMER_CAPACITY
            )));
        }
        if !matches!(self.output.format.as_str(), "console" | "json" | "csv") {
            return Err(GpsError::ConfigError(format!(
                "Unknown output format {:?}; expected console, json or csv",
                self.output.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.framer_capacity, 256);
        assert_eq!(config.init_command.as_deref(), Some(DEFAULT_INIT_COMMAND));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            serial_port = "/dev/ttyAMA0"
            baud_rate = 38400

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.serial_port, "/dev/ttyAMA0");
        assert_eq!(config.baud_rate, 38400);
        assert_eq!(config.output.format, "json");
        assert_eq!(config.output.file_path, None);
        assert_eq!(config.framer_capacity, 256);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.framer_capacity = 4;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.baud_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("nmea_fix_config_{}.toml", std::process::id()));
        let mut config = Config::default();
        config.serial_port = "/dev/ttyS3".to_string();
        config.output.file_path = Some("fixes.csv".to_string());

        config.save_to_file(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_disabled_init_command_survives_reload() {
        let path = std::env::temp_dir().join(format!("nmea_fix_no_init_{}.toml", std::process::id()));
        let mut config = Config::default();
        config.init_command = None;

        config.save_to_file(&path).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(saved.contains("init_command = \"\""));
        assert_eq!(loaded.init_command, None);
        assert_eq!(loaded, config);
    }
}

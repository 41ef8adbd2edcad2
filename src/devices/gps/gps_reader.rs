use log::{debug, error, info};
use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use crate::devices::traits::ByteSource;
use crate::nmea::checksum::frame_sentence;
use crate::utils::error::GpsError;

const READ_CHUNK: usize = 256;

/// A receiver on a serial port, read one byte at a time.
pub struct SerialGpsReader {
    port: Box<dyn SerialPort>,
    port_name: String,
    chunk: [u8; READ_CHUNK],
    pos: usize,
    len: usize,
}

impl SerialGpsReader {
    pub fn new(port_name: &str, baud_rate: u32, timeout_ms: u64) -> Result<Self, GpsError> {
        info!("🧭 Initializing GPS on port {} at {} baud", port_name, baud_rate);

        let port = serialport::new(port_name, baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .timeout(Duration::from_millis(timeout_ms))
            .open()
            .map_err(|e| {
                error!("❌ Failed to open serial port {}: {}", port_name, e);
                GpsError::ConnectionError(format!("Failed to open GPS port {}: {}", port_name, e))
            })?;

        Ok(Self {
            port,
            port_name: port_name.to_string(),
            chunk: [0u8; READ_CHUNK],
            pos: 0,
            len: 0,
        })
    }
}

impl ByteSource for SerialGpsReader {
    fn name(&self) -> &str {
        &self.port_name
    }

    fn next_byte(&mut self) -> Result<Option<u8>, GpsError> {
        while self.pos == self.len {
            match self.port.read(&mut self.chunk) {
                Ok(0) => return Err(GpsError::Timeout),
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(ref e) if e.kind() == ErrorKind::TimedOut => return Err(GpsError::Timeout),
                Err(e) => {
                    return Err(GpsError::CommunicationError(format!(
                        "GPS read error on {}: {}",
                        self.port_name, e
                    )))
                }
            }
        }

        let byte = self.chunk[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    fn send_configuration(&mut self, command: &str) -> Result<(), GpsError> {
        let framed = if command.starts_with('$') && command.ends_with("\r\n") {
            command.to_string()
        } else {
            frame_sentence(command.trim())
        };
        debug!("📤 Sending GPS command: {}", framed.trim_end());

        self.port
            .write_all(framed.as_bytes())
            .map_err(|e| GpsError::CommunicationError(format!("Failed to send GPS command: {}", e)))?;
        self.port
            .flush()
            .map_err(|e| GpsError::CommunicationError(format!("Failed to flush GPS port: {}", e)))?;

        info!("✅ GPS module configured");
        Ok(())
    }
}

/// Ports the OS knows about, with a one-line description each.
pub fn list_serial_ports() -> Result<Vec<(String, String)>, GpsError> {
    let ports: Vec<SerialPortInfo> = serialport::available_ports()?;
    Ok(ports
        .into_iter()
        .map(|port| {
            let description = match port.port_type {
                SerialPortType::UsbPort(usb) => format!(
                    "USB {:04x}:{:04x} {}",
                    usb.vid,
                    usb.pid,
                    usb.product.or(usb.manufacturer).unwrap_or_default()
                ),
                SerialPortType::PciPort => "PCI".to_string(),
                SerialPortType::BluetoothPort => "Bluetooth".to_string(),
                SerialPortType::Unknown => "Unknown".to_string(),
            };
            (port.port_name, description)
        })
        .collect())
}

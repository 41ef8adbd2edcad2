pub mod gps_reader;
pub mod replay;

pub use gps_reader::{list_serial_ports, SerialGpsReader};
pub use replay::ReplaySource;

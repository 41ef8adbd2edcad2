pub mod gps;
pub mod traits;

pub use gps::{list_serial_ports, ReplaySource, SerialGpsReader};
pub use traits::{ByteSource, SourceBytes};

pub mod formatters;
pub mod reporter;
pub mod senders;

pub use formatters::{formatter_for, ConsoleFormatter, CsvFormatter, JsonFormatter, ReportFormatter};
pub use reporter::Reporter;
pub use senders::{ConsoleSender, FileSender, ReportSender};

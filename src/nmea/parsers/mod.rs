//! One field parser per supported sentence type. Each writes only the fields
//! its sentence carries and reports the ones it had to skip.

pub mod fields;
pub mod gga;
pub mod gll;
pub mod rmc;
pub mod vtg;

pub use fields::{FieldReport, Fields};

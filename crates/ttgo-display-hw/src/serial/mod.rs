//! Serial transport.
//!
//! Each command is sent as its own COBS-stuffed JSON frame over a
//! 115200-8-N-1 link.

mod device;

pub mod frame;

pub use device::SerialClient;
pub use frame::{build_frame, decode_frame, encode_frame, FRAME_DELIMITER};

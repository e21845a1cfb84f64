//! HTTP transport.
//!
//! Commands are queued locally and delivered as one batch per flush.

mod device;

pub use device::HttpClient;

/// Form field carrying the JSON batch.
pub const COMMAND_FIELD: &str = "command_data";

/// Path of the command endpoint on the device.
pub const COMMAND_PATH: &str = "/command";

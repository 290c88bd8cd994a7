pub mod endpoint;
pub mod log_entry;

pub use endpoint::*;
pub use log_entry::*;

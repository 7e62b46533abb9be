//! Live adapters for real external interactions.

pub mod clock;
pub mod docstore;
pub mod model;
pub mod source_host;

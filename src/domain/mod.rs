//! Processor-facing domain: value types, request assembly, response parsing
//! and classification, and the transport port.

pub mod money;
pub mod params;
pub mod ports;
pub mod request;
pub mod response;
pub mod transaction;
pub mod tree;

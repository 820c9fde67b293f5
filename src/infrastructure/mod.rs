//! Adapters for the domain ports.

pub mod clock;
pub mod http;
pub mod mock;
pub mod scrub;

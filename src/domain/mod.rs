//! Gateway-independent payment types and the ports the adapter talks through.

pub mod authorization;
pub mod card;
pub mod money;
pub mod options;
pub mod ports;
pub mod purchase_number;
pub mod response;
pub mod result;

//! Application layer orchestrating gateway calls.
//!
//! `VisanetPeruGateway` is the entry point. It builds requests with `RequestBuilder`,
//! sends them through the transport port, and turns each response into a
//! `TransactionResult` via the classifier and normalizer.

pub mod classifier;
pub mod gateway;
pub mod normalizer;
pub mod request_builder;

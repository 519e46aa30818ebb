//! Recording adapters that capture interactions while a suite records.

pub mod http;

pub use http::ExchangeRecorder;

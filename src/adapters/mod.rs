//! Adapter implementations for all port traits.
//!
//! - `live` touches real processes, files and networks.
//! - `mocked` holds the stand-ins a test session installs.
//! - `recording` captures HTTP exchanges while a suite records.

pub mod live;
pub mod mocked;
pub mod recording;

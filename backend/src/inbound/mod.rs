//! Inbound adapters that translate external requests into catalog calls
//! while keeping transport details at the edge.
//!
//! [`http`] serves the JSON API; [`console`] drives the interactive menu.

pub mod console;
pub mod http;

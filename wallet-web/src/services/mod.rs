//! Browser services

pub mod ethereum;

pub use ethereum::BrowserHost;

//! Page modules

pub mod connect;
pub mod send;
pub mod status;

pub use connect::ConnectPage;
pub use send::SendPage;
pub use status::StatusPage;

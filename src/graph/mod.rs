pub mod client;
pub mod rejected;
pub mod transport;

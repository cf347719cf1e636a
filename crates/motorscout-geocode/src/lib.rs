pub mod client;
pub mod error;
pub mod types;

pub use client::PostcodesIoClient;
pub use error::GeocodeError;

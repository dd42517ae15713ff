pub mod collaborators;
pub mod destination;
pub mod error;
pub mod http;
pub mod prelude;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::MagicLinkError;
pub use error::Result;
pub use http::MagicLinkApi;
pub use service::MagicLinkService;

pub const DEFAULT_HOST: &'static str = "streamlabs.com";

pub fn timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

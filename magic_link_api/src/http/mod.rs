mod api;
pub mod types;

pub use api::MagicLinkApi;
pub use api::authorized_headers;

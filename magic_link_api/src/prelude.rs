pub use crate::collaborators::*;
pub use crate::destination::SubPage;
pub use crate::http::types::*;
pub use crate::MagicLinkApi;
pub use crate::MagicLinkError;
pub use crate::MagicLinkService;
pub use crate::DEFAULT_HOST;

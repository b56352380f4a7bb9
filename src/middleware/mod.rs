pub mod auth;
pub mod response;

pub use auth::AuthUser;
pub use response::{ApiResult, Envelope};

pub mod auth;
pub mod response;
pub mod roles;

pub use auth::{require_token, AuthUser};
pub use response::{ApiResponse, ApiResult};
pub use roles::{require_admin, require_tutor};

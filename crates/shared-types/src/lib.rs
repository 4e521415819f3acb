pub mod error;
pub mod feature_flags;
pub mod form;
pub mod password;
pub mod requests;

pub use error::*;
pub use feature_flags::*;
pub use form::*;
pub use password::*;
pub use requests::*;

/// Placeholder backend path for the password change call.
pub const CHANGE_PASSWORD_PATH: &str = "/noendpoint";

pub mod password;

pub use password::{
    submit_password_change, FormHandle, HttpPasswordClient, PasswordClient, DEFAULT_API_BASE_URL,
};

// handlers/public/auth/mod.rs - Account creation and token acquisition
use serde::Deserialize;

pub mod login;
pub mod register;

pub use login::login as auth_login;
pub use register::register as auth_register;

/// Body shared by registration and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

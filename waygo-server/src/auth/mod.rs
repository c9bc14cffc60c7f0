//! Account login and registration against the DummyJSON mock API.

mod client;
mod error;
mod flow;
mod session;
mod validate;

#[cfg(test)]
pub(crate) use flow::test_support;

pub use client::{AuthApi, AuthClient, AuthConfig};
pub use error::{AuthError, GENERIC_FAILURE};
pub use flow::{login, register};
pub use session::{CreatedUser, LoginResponse, NewUser, Session, User, fallback_session};
pub use validate::{
    Credentials, FieldError, RegisterForm, ValidationErrors, validate_login, validate_registration,
};

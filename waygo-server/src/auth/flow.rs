//! Login and registration flows over an [`AuthApi`].

use tracing::{info, warn};

use super::client::AuthApi;
use super::error::AuthError;
use super::session::{NewUser, Session, fallback_session};
use super::validate::{Credentials, RegisterForm, validate_login, validate_registration};

/// Validate, then sign in.
pub async fn login(api: &dyn AuthApi, credentials: &Credentials) -> Result<Session, AuthError> {
    validate_login(credentials)?;
    let session = api.login(credentials).await?.into_session()?;
    info!(username = %session.user.username, "signed in");
    Ok(session)
}

/// Validate, create the account, then sign in as it.
///
/// The mock API accepts new users without storing them, so the follow-up
/// login normally fails. In that case the created user gets a local
/// session instead.
pub async fn register(api: &dyn AuthApi, form: &RegisterForm) -> Result<Session, AuthError> {
    validate_registration(form)?;

    let new_user = NewUser::from_form(form);
    let created = api.add_user(&new_user).await?;

    let credentials = Credentials {
        username: new_user.username.clone(),
        password: new_user.password.clone(),
    };

    match api
        .login(&credentials)
        .await
        .and_then(|response| response.into_session())
    {
        Ok(session) => {
            info!(username = %session.user.username, "registered and signed in");
            Ok(session)
        }
        Err(e) => {
            warn!(username = %new_user.username, error = %e, "login after registration failed, using local session");
            let now = chrono::Utc::now().timestamp_millis();
            Ok(fallback_session(&created, &new_user, now))
        }
    }
}

use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_database::{keys, AppState, HospiGoApiClient, LocalStore};
use shared_models::auth::{Credentials, Session, UserAuthResponse};

use crate::error::{AuthError, HOSPITAL_LOGIN_FAILED, USER_LOGIN_FAILED};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Checks the hospital login form and returns the trimmed credentials to send.
pub fn validate_hospital_login(credentials: &Credentials) -> Result<Credentials, AuthError> {
    if credentials.name.trim().is_empty() {
        return Err(AuthError::Validation("Hospital name is required".to_string()));
    }
    if credentials.password.trim().is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }
    // Length is counted in UTF-16 code units, before trimming.
    if credentials.password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(trimmed(credentials))
}

pub fn validate_user_credentials(credentials: &Credentials) -> Result<Credentials, AuthError> {
    if credentials.name.trim().is_empty() {
        return Err(AuthError::Validation("Username is required".to_string()));
    }
    if credentials.password.trim().is_empty() {
        return Err(AuthError::Validation("Password is required".to_string()));
    }
    Ok(trimmed(credentials))
}

fn trimmed(credentials: &Credentials) -> Credentials {
    Credentials {
        name: credentials.name.trim().to_string(),
        password: credentials.password.trim().to_string(),
    }
}

pub struct SessionService {
    store: Arc<LocalStore>,
    api: HospiGoApiClient,
}

impl SessionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            api: state.api.clone(),
        }
    }

    pub async fn hospital_login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let credentials = validate_hospital_login(credentials)?;
        debug!("Hospital login for {}", credentials.name);

        let response = self.api.hospital_login(&credentials).await.map_err(|e| {
            warn!("Hospital login failed for {}: {}", credentials.name, e);
            AuthError::Rejected(HOSPITAL_LOGIN_FAILED.to_string())
        })?;

        let hospital_id = response.hospital_id.ok_or_else(|| {
            warn!("Login response for {} carried no hospital_id", credentials.name);
            AuthError::Rejected(HOSPITAL_LOGIN_FAILED.to_string())
        })?;
        let hospital_name = response
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(credentials.name);

        self.store
            .set_item(keys::HOSPITAL_ID, hospital_id.to_string())
            .await?;
        self.store
            .set_item(keys::HOSPITAL_NAME, hospital_name.clone())
            .await?;

        info!("Hospital {} logged in as {}", hospital_id, hospital_name);
        Ok(self.session().await)
    }

    pub async fn user_login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let credentials = validate_user_credentials(credentials)?;

        let response = self.api.user_login(&credentials).await.map_err(|e| {
            warn!("User login failed for {}: {}", credentials.name, e);
            AuthError::Rejected(USER_LOGIN_FAILED.to_string())
        })?;

        self.remember_user(response, &credentials.name, USER_LOGIN_FAILED)
            .await
    }

    pub async fn user_register(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let credentials = validate_user_credentials(credentials)?;

        let response = self
            .api
            .user_register(&credentials)
            .await
            .map_err(|e| AuthError::RegistrationFailed(e.to_string()))?;

        self.remember_user(response, &credentials.name, "Registration failed")
            .await
    }

    async fn remember_user(
        &self,
        response: UserAuthResponse,
        username: &str,
        failure: &str,
    ) -> Result<Session, AuthError> {
        let user_id = response
            .user_id
            .ok_or_else(|| AuthError::Rejected(failure.to_string()))?;

        self.store.set_item(keys::USER_ID, user_id.to_string()).await?;
        self.store
            .set_item(keys::USERNAME, username.to_string())
            .await?;

        info!("User {} signed in as {}", user_id, username);
        Ok(self.session().await)
    }

    pub async fn session(&self) -> Session {
        Session {
            hospital_id: self.store.get_item(keys::HOSPITAL_ID).await,
            hospital_name: self.store.get_item(keys::HOSPITAL_NAME).await,
            user_id: self.store.get_item(keys::USER_ID).await,
            username: self.store.get_item(keys::USERNAME).await,
        }
    }

    /// Forgets both the hospital and the user identity.
    pub async fn logout(&self) -> Result<(), AuthError> {
        for key in [keys::HOSPITAL_ID, keys::HOSPITAL_NAME, keys::USER_ID, keys::USERNAME] {
            self.store.remove_item(key).await?;
        }
        info!("Session cleared");
        Ok(())
    }
}

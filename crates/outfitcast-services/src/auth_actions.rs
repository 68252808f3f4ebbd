//! Sign-in and sign-out actions.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use outfitcast_core::{AppError, ErrorClassifier};
use outfitcast_store::{AuthStore, Severity, UiStore, User, UserSettings};
use uuid::Uuid;

/// Verifies credentials and produces the signed-in profile.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError>;
}

/// Accepts any well-formed credentials and builds a client-local profile.
#[derive(Debug, Clone, Default)]
pub struct LocalAuthenticator;

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn authenticate(&self, email: &str, _password: &str) -> Result<User, AppError> {
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(User {
            id: format!("local-{}", Uuid::new_v4()),
            email: email.to_string(),
            name,
            avatar: None,
            settings: UserSettings::default(),
            created_at: Utc::now(),
        })
    }
}

/// Reject obviously malformed credentials before calling the authenticator.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("Enter a valid email address.").with_code("AUTH_INVALID_EMAIL"));
    }
    if password.is_empty() {
        return Err(AppError::validation("Enter your password.").with_code("AUTH_MISSING_PASSWORD"));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AuthActions {
    authenticator: Arc<dyn Authenticator>,
    auth: AuthStore,
    ui: UiStore,
}

impl AuthActions {
    pub fn new(authenticator: Arc<dyn Authenticator>, auth: AuthStore, ui: UiStore) -> Self {
        Self {
            authenticator,
            auth,
            ui,
        }
    }

    /// Validate, authenticate and sign in. Emits one notification either way.
    pub async fn login_with_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = email.trim();
        if let Err(error) = validate_credentials(email, password) {
            self.fail(&error);
            return Err(error);
        }

        self.auth.set_loading(true);
        match self.authenticator.authenticate(email, password).await {
            Ok(user) => {
                tracing::info!("Signed in as {}", user.email);
                self.auth.login(user.clone());
                self.ui
                    .add_notification(Severity::Success, format!("Welcome, {}", user.name));
                Ok(user)
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.ui.add_notification(Severity::Info, "Signed out");
    }

    fn fail(&self, error: &AppError) {
        ErrorClassifier::log_error(error);
        self.auth
            .set_error(Some(ErrorClassifier::get_error_message(error).to_string()));
        self.ui
            .add_notification(Severity::Error, ErrorClassifier::get_error_message(error));
    }
}

use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::{event, instrument, Level};

use crate::domain::{activity::ActivityAction, user::User};
use crate::ports::user_repository::UserRepository;

use super::activity_recorder::ActivityRecorder;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or PIN")]
    InvalidCredentials,
    #[error("User is not active")]
    InactiveUser,
    #[error("Failed to look up user")]
    RepositoryError,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    recorder: ActivityRecorder,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, recorder: ActivityRecorder) -> Self {
        Self { users, recorder }
    }

    /// Checks the credentials without leaving a trace in the activity log.
    #[instrument(skip(self, pin))]
    pub async fn authenticate(&self, email: &str, pin: &str) -> error_stack::Result<User, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .change_context(AuthError::RepositoryError)?
            .ok_or_else(|| report!(AuthError::InvalidCredentials))?;

        if user.pin != pin {
            event!(Level::WARN, email, "Wrong PIN");
            return Err(report!(AuthError::InvalidCredentials));
        }
        if !user.active {
            return Err(report!(AuthError::InactiveUser));
        }
        Ok(user)
    }

    #[instrument(skip(self, pin))]
    pub async fn login(&self, email: &str, pin: &str) -> error_stack::Result<User, AuthError> {
        let user = self.authenticate(email, pin).await?;
        self.recorder
            .record(
                &user,
                ActivityAction::Login,
                format!("Inicio de sesión: {}", user.email),
            )
            .await;
        event!(Level::INFO, user = %user.email, role = %user.role, "Logged in");
        Ok(user)
    }
}

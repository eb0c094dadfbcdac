use std::sync::Arc;

use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    activity::ActivityAction,
    user::{User, UserUpdate},
};
use crate::ports::user_repository::{UserRepository, UserRepositoryError};

use super::activity_recorder::ActivityRecorder;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserServiceError {
    #[error("{0} is not allowed to manage users")]
    PermissionDenied(String),
    #[error("User {0} not found")]
    NotFound(u32),
    #[error("Invalid user: {0}")]
    InvalidUser(&'static str),
    #[error("User storage failed")]
    RepositoryError,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    recorder: ActivityRecorder,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, recorder: ActivityRecorder) -> Self {
        Self { users, recorder }
    }

    fn require_manager(actor: &User) -> error_stack::Result<(), UserServiceError> {
        if actor.role.can_manage_users() {
            Ok(())
        } else {
            Err(report!(UserServiceError::PermissionDenied(
                actor.role.to_string()
            )))
        }
    }

    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn list_users(&self, actor: &User) -> error_stack::Result<Vec<User>, UserServiceError> {
        Self::require_manager(actor)?;
        self.users
            .list()
            .await
            .change_context(UserServiceError::RepositoryError)
    }

    #[instrument(skip(self), fields(actor = %actor.email))]
    pub async fn update_user(
        &self,
        actor: &User,
        id: u32,
        update: UserUpdate,
    ) -> error_stack::Result<User, UserServiceError> {
        Self::require_manager(actor)?;

        let mut user = self
            .users
            .list()
            .await
            .change_context(UserServiceError::RepositoryError)?
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| report!(UserServiceError::NotFound(id)))?;

        user.apply(update);
        user.email = user.email.trim().to_owned();
        if user.email.is_empty() {
            return Err(report!(UserServiceError::InvalidUser("email is required")));
        }
        if user.pin.is_empty() {
            return Err(report!(UserServiceError::InvalidUser("PIN is required")));
        }

        self.users.update(&user).await.map_err(|report| {
            let context = match report.current_context() {
                UserRepositoryError::NotFound(id) => UserServiceError::NotFound(*id),
                _ => UserServiceError::RepositoryError,
            };
            report.change_context(context)
        })?;

        self.recorder
            .record(
                actor,
                ActivityAction::EditUser,
                format!(
                    "Usuario editado: {} ({}) - Rol: {}",
                    user.name, user.email, user.role
                ),
            )
            .await;
        Ok(user)
    }
}

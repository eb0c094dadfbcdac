use thiserror::Error;

use crate::domain::user::User;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserRepositoryError {
    #[error("Failed to fetch users from repository")]
    FetchUsersError,
    #[error("User {0} not found")]
    NotFound(u32),
    #[error("Failed to write user to repository")]
    WriteError,
}

#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> error_stack::Result<Vec<User>, UserRepositoryError>;

    /// Case-insensitive lookup by email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> error_stack::Result<Option<User>, UserRepositoryError>;

    async fn update(&self, user: &User) -> error_stack::Result<(), UserRepositoryError>;
}

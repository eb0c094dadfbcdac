use std::sync::Arc;

use error_stack::{report, ResultExt};
use tracing::instrument;

use crate::adapters::sheets::{
    records::{user_from_row, user_to_row},
    spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite,
};
use crate::domain::{sheets::ranges::USERS, user::User};
use crate::ports::user_repository::{UserRepository, UserRepositoryError};

/// Users in the `Usuarios` table. A user's id is its position in the table.
pub struct SpreadsheetUserRepository<S> {
    sheets: Arc<S>,
    sheet_title: String,
}

impl<S> std::fmt::Debug for SpreadsheetUserRepository<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetUserRepository {{ sheet: {} }}", self.sheet_title)
    }
}

impl<S> SpreadsheetUserRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    pub fn new(sheets: Arc<S>, sheet_title: impl Into<String>) -> Self {
        Self {
            sheets,
            sheet_title: sheet_title.into(),
        }
    }

    async fn read_table(&self) -> error_stack::Result<Vec<Vec<String>>, UserRepositoryError> {
        let range = USERS.table_range(&self.sheet_title);
        self.sheets
            .read_range(&range)
            .await
            .change_context(UserRepositoryError::FetchUsersError)
            .attach_printable_lazy(|| format!("Failed to read users from {}", range))
    }
}

#[async_trait::async_trait]
impl<S> UserRepository for SpreadsheetUserRepository<S>
where
    S: SpreadsheetRead + SpreadsheetWrite + Send + Sync,
{
    #[instrument(skip(self))]
    async fn list(&self) -> error_stack::Result<Vec<User>, UserRepositoryError> {
        let rows = self.read_table().await?;
        Ok(rows
            .iter()
            .enumerate()
            .map(|(position, row)| user_from_row(position, row))
            .filter(|user| !user.email.is_empty())
            .collect())
    }

    #[instrument(skip(self))]
    async fn find_by_email(
        &self,
        email: &str,
    ) -> error_stack::Result<Option<User>, UserRepositoryError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|user| user.email.to_lowercase() == email))
    }

    #[instrument(skip(self), fields(id = user.id))]
    async fn update(&self, user: &User) -> error_stack::Result<(), UserRepositoryError> {
        let rows = self.read_table().await?;
        if user.id == 0 || user.id as usize > rows.len() {
            return Err(report!(UserRepositoryError::NotFound(user.id)));
        }

        let range = USERS.row_range(&self.sheet_title, USERS.row_at(user.id as usize - 1));
        self.sheets
            .write_range(&range, &[user_to_row(user)])
            .await
            .change_context(UserRepositoryError::WriteError)
            .attach_printable_lazy(|| format!("Failed to write user to {}", range))
    }
}

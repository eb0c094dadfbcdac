use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Access level stored as a one-letter code in the `Rol` column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Role {
    Prime,
    Admin,
    Usuario,
    Visualizador,
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Prime => "Z",
            Role::Admin => "A",
            Role::Usuario => "B",
            Role::Visualizador => "C",
        }
    }

    /// Unknown codes get the least privileged role.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "Z" => Role::Prime,
            "A" => Role::Admin,
            "B" => Role::Usuario,
            _ => Role::Visualizador,
        }
    }

    pub fn can_edit_assets(&self) -> bool {
        !matches!(self, Role::Visualizador)
    }

    pub fn can_delete_assets(&self) -> bool {
        matches!(self, Role::Prime | Role::Admin)
    }

    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Prime | Role::Admin)
    }

    pub fn can_view_history(&self) -> bool {
        matches!(self, Role::Prime)
    }
}

/// A collaborator from the `Usuarios` sheet. `id` is its position in the table (1-based).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub pin: String,
    pub role: Role,
    pub active: bool,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("active", &self.active)
            .finish()
    }
}

impl User {
    /// Name used when signing activity entries.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(pin) = update.pin {
            self.pin = pin;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }
}

/// Partial edit of a user; absent fields keep their current value.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub pin: Option<String>,
    pub role: Option<Role>,
}

impl std::fmt::Debug for UserUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserUpdate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("pin", &self.pin.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

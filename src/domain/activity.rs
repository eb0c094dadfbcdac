use serde::{Deserialize, Serialize};

/// Kind of entry in the activity log (`Accion` column).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActivityAction {
    Login,
    Create,
    Edit,
    Delete,
    EditUser,
    /// Anything written to the sheet by hand.
    Other(String),
}

impl ActivityAction {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityAction::Login => "LOGIN",
            ActivityAction::Create => "CREAR",
            ActivityAction::Edit => "EDITAR",
            ActivityAction::Delete => "ELIMINAR",
            ActivityAction::EditUser => "EDITAR_USUARIO",
            ActivityAction::Other(other) => other,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActivityAction::Login => "Inicio de sesión",
            ActivityAction::Create => "Crear activo",
            ActivityAction::Edit => "Editar activo",
            ActivityAction::Delete => "Eliminar activo",
            ActivityAction::EditUser => "Editar usuario",
            ActivityAction::Other(other) => other,
        }
    }
}

impl From<&str> for ActivityAction {
    fn from(value: &str) -> Self {
        match value.trim() {
            "LOGIN" => ActivityAction::Login,
            "CREAR" => ActivityAction::Create,
            "EDITAR" => ActivityAction::Edit,
            "ELIMINAR" => ActivityAction::Delete,
            "EDITAR_USUARIO" => ActivityAction::EditUser,
            other => ActivityAction::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityAction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityAction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(ActivityAction::from(value.as_str()))
    }
}

/// One row of the `Registro` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub numero: u32,
    pub date: String,
    pub time: String,
    pub user: String,
    pub action: ActivityAction,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actions_round_trip() {
        for action in [
            ActivityAction::Login,
            ActivityAction::Create,
            ActivityAction::Edit,
            ActivityAction::Delete,
            ActivityAction::EditUser,
        ] {
            assert_eq!(ActivityAction::from(action.as_str()), action);
        }
    }

    #[test]
    fn test_unknown_action_is_kept() {
        let action = ActivityAction::from("IMPORTAR");
        assert_eq!(action, ActivityAction::Other("IMPORTAR".into()));
        assert_eq!(action.to_string(), "IMPORTAR");
        assert_eq!(action.label(), "IMPORTAR");
    }

    #[test]
    fn test_serde_uses_sheet_names() {
        let json = serde_json::to_string(&ActivityAction::EditUser).unwrap();
        assert_eq!(json, "\"EDITAR_USUARIO\"");
        let back: ActivityAction = serde_json::from_str("\"ELIMINAR\"").unwrap();
        assert_eq!(back, ActivityAction::Delete);
    }
}

use std::fmt::Formatter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<A1Notation> for String {
    fn from(a1_notation: A1Notation) -> Self {
        a1_notation.0
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl From<&str> for A1Notation {
    fn from(s: &str) -> Self {
        A1Notation(s.to_owned())
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

pub trait FromA1Notation: Sized {
    type Err;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum A1NotationParseError {
    #[error("Error parsing column")]
    ColumnParseError,
    #[error("Error parsing row")]
    RowParseError,
    #[error("Missing cell reference")]
    MissingCell,
}

pub struct A1NotationParts {
    pub start: String,
    pub end: String,
    pub sheet_title: Option<String>,
}

/// Prefix for a sheet title, quoted so titles with spaces or symbols survive.
pub fn sheet_prefix(sheet_name: Option<&str>) -> String {
    match sheet_name {
        Some(sheet_name) => format!("'{}'!", sheet_name.replace('\'', "''")),
        None => String::new(),
    }
}

pub fn generic_a1_notation_split(a1_notation: &A1Notation) -> A1NotationParts {
    let (sheet_title, local_a1_notation) = match a1_notation.0.rfind('!') {
        Some(index) => {
            let (sheet_title, local_a1_notation) = a1_notation.0.split_at(index);
            (
                Some(unquote_sheet_title(sheet_title)),
                local_a1_notation.trim_start_matches('!').to_owned(),
            )
        }
        None => (None, a1_notation.0.clone()),
    };

    let (start, end) = match local_a1_notation.find(':') {
        Some(index) => {
            let (start, end) = local_a1_notation.split_at(index);
            (start.to_owned(), end.trim_start_matches(':').to_owned())
        }
        None => (local_a1_notation.clone(), local_a1_notation),
    };

    A1NotationParts {
        sheet_title,
        start,
        end,
    }
}

fn unquote_sheet_title(title: &str) -> String {
    match title
        .strip_prefix('\'')
        .and_then(|title| title.strip_suffix('\''))
    {
        Some(quoted) => quoted.replace("''", "'"),
        None => title.to_owned(),
    }
}

/// Splits `AB12` into (`AB`, `12`). The row part may be empty (`M`).
pub fn split_cell_reference(reference: &str) -> (&str, &str) {
    let digits_at = reference
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(reference.len());
    reference.split_at(digits_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_quoted_sheet() {
        let parts = generic_a1_notation_split(&"'Activos'!A5:M".into());
        assert_eq!(parts.sheet_title.as_deref(), Some("Activos"));
        assert_eq!(parts.start, "A5");
        assert_eq!(parts.end, "M");
    }

    #[test]
    fn test_split_unquoted_single_cell() {
        let parts = generic_a1_notation_split(&"Usuarios!B3".into());
        assert_eq!(parts.sheet_title.as_deref(), Some("Usuarios"));
        assert_eq!(parts.start, "B3");
        assert_eq!(parts.end, "B3");
    }

    #[test]
    fn test_split_without_sheet() {
        let parts = generic_a1_notation_split(&"A2:D".into());
        assert_eq!(parts.sheet_title, None);
        assert_eq!(parts.start, "A2");
        assert_eq!(parts.end, "D");
    }

    #[test]
    fn test_sheet_prefix_escapes_quotes() {
        assert_eq!(sheet_prefix(Some("Bob's")), "'Bob''s'!");
        assert_eq!(sheet_prefix(None), "");
        let parts = generic_a1_notation_split(&"'Bob''s'!A1".into());
        assert_eq!(parts.sheet_title.as_deref(), Some("Bob's"));
    }

    #[test]
    fn test_split_cell_reference() {
        assert_eq!(split_cell_reference("AB12"), ("AB", "12"));
        assert_eq!(split_cell_reference("M"), ("M", ""));
    }
}

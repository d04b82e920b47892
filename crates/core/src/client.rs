//! Client (gym member) domain rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Membership status stored in `clients.status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Overdue,
}

impl ClientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Overdue => "overdue",
        }
    }
}

/// Join first and last name the way reports and filenames display them.
///
/// A missing or blank last name yields just the first name.
pub fn full_name(first_name: &str, last_name: Option<&str>) -> String {
    let first = first_name.trim();
    match last_name.map(str::trim) {
        Some(last) if !last.is_empty() => format!("{first} {last}").trim().to_string(),
        _ => first.to_string(),
    }
}

/// A client must have a non-blank first name.
pub fn validate_first_name(first_name: &str) -> Result<(), CoreError> {
    if first_name.trim().is_empty() {
        return Err(CoreError::Validation("first_name is required".into()));
    }
    Ok(())
}

//! User roles.

use serde::{Deserialize, Deserializer, Serialize};

/// Role carried in the identity provider's user metadata.
///
/// Closed set: any metadata value outside "candidate"/"recruiter" collapses
/// to `Unset`, so role absence is the only condition gates ever check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
    #[default]
    Unset,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Role::from_metadata(Some(&value)))
    }
}

impl Role {
    /// Parse the raw metadata value; absent or unrecognized means `Unset`.
    pub fn from_metadata(value: Option<&str>) -> Self {
        match value {
            Some("candidate") => Role::Candidate,
            Some("recruiter") => Role::Recruiter,
            _ => Role::Unset,
        }
    }

    /// Value to store in the provider's metadata; `Unset` has none.
    pub fn metadata_value(&self) -> Option<&'static str> {
        match self {
            Role::Candidate => Some("candidate"),
            Role::Recruiter => Some("recruiter"),
            Role::Unset => None,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Role::Unset)
    }
}

use serde::{Deserialize, Serialize};

use crate::birthday::BirthDate;

/// A tracked child as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kid {
    pub id: String,
    pub name: String,
    pub birthday: BirthDate,
    /// Image URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

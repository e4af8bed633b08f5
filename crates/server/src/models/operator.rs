//! Operator domain types.
//!
//! An operator is an authentication principal tied to exactly one person.
//! The domain [`Operator`] deliberately carries no password material; the
//! stored hash is only reachable through [`OperatorCredentials`], which the
//! authentication service fetches separately and never serializes out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sari_core::{OperatorCode, OperatorId, PersonId};

/// An operator (domain type). The "manageable" fields only - no password.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    /// Unique operator ID.
    pub id: OperatorId,
    /// The person backing this operator.
    pub person_id: PersonId,
    /// Unique login code (`OP-XXXXXXXX`).
    pub code: OperatorCode,
    /// When the operator was created.
    pub created_at: DateTime<Utc>,
    /// When the operator was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Login credentials row: operator id plus the stored password hash.
///
/// Never serialized; exists only inside the authentication path.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OperatorCredentials {
    pub id: OperatorId,
    pub password_hash: String,
}

/// Data for creating a new operator (composite create request body).
///
/// The code is generated server-side and the password is validated and
/// hashed before it reaches the repository.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOperator {
    pub password: String,
}

/// Partial update for an operator. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorPatch {
    /// Re-point the operator at a different person.
    #[serde(default)]
    pub person_id: Option<PersonId>,
    /// New plaintext password; validated and hashed by the handler.
    #[serde(default)]
    pub password: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_serializes_without_password() {
        let operator = Operator {
            id: OperatorId::generate(),
            person_id: PersonId::generate(),
            code: OperatorCode::parse("OP-AB12CD34").unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&operator).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json.get("code").unwrap(), "OP-AB12CD34");
        assert!(json.get("personId").is_some());
    }
}

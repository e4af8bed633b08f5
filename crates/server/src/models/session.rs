//! Session identity.
//!
//! The session store keeps only a compact identity record, not the whole
//! operator row. Handlers that need fresh operator data re-resolve it
//! against the database.

use serde::{Deserialize, Serialize};

use sari_core::{OperatorCode, OperatorId};

use super::Operator;

/// Session keys used with tower-sessions.
pub mod keys {
    /// The authenticated operator identity.
    pub const CURRENT_OPERATOR: &str = "current_operator";
}

/// The identity stored in an authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOperator {
    pub id: OperatorId,
    pub code: OperatorCode,
}

impl From<&Operator> for CurrentOperator {
    fn from(operator: &Operator) -> Self {
        Self {
            id: operator.id,
            code: operator.code.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrips_through_json() {
        let identity = CurrentOperator {
            id: OperatorId::generate(),
            code: OperatorCode::parse("OP-12AB34CD").unwrap(),
        };

        let json = serde_json::to_string(&identity).unwrap();
        let back: CurrentOperator = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, identity.id);
        assert_eq!(back.code.as_ref(), "OP-12AB34CD");
    }
}

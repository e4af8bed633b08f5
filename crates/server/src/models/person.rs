//! Person domain types.
//!
//! A person is the biographical record backing an operator. Persons are
//! created together with their operator through the composite creator and
//! managed independently afterwards.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use sari_core::PersonId;

/// A person (domain type).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique person ID.
    pub id: PersonId,
    /// Date of birth.
    pub birthdate: NaiveDate,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Optional name suffix (e.g., "Jr.").
    pub suffix: Option<String>,
    /// When the person was created.
    pub created_at: DateTime<Utc>,
    /// When the person was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new person.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub birthdate: NaiveDate,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

/// Partial update for a person. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl Person {
    /// Apply a partial update, returning the merged field values to write.
    #[must_use]
    pub fn merged(&self, patch: &PersonPatch) -> Self {
        Self {
            id: self.id,
            birthdate: patch.birthdate.unwrap_or(self.birthdate),
            first_name: patch
                .first_name
                .clone()
                .unwrap_or_else(|| self.first_name.clone()),
            last_name: patch
                .last_name
                .clone()
                .unwrap_or_else(|| self.last_name.clone()),
            middle_name: patch.middle_name.clone().or_else(|| self.middle_name.clone()),
            suffix: patch.suffix.clone().or_else(|| self.suffix.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Person {
        Person {
            id: PersonId::generate(),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            first_name: "System".to_owned(),
            last_name: "Admin".to_owned(),
            middle_name: None,
            suffix: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_merged_overrides_present_fields() {
        let person = sample();
        let patch = PersonPatch {
            first_name: Some("Juan".to_owned()),
            suffix: Some("Jr.".to_owned()),
            ..PersonPatch::default()
        };

        let merged = person.merged(&patch);
        assert_eq!(merged.first_name, "Juan");
        assert_eq!(merged.last_name, "Admin");
        assert_eq!(merged.suffix.as_deref(), Some("Jr."));
        assert_eq!(merged.id, person.id);
    }

    #[test]
    fn test_merged_empty_patch_is_identity() {
        let person = sample();
        let merged = person.merged(&PersonPatch::default());
        assert_eq!(merged.first_name, person.first_name);
        assert_eq!(merged.birthdate, person.birthdate);
    }

    #[test]
    fn test_serializes_camel_case() {
        let person = sample();
        let json = serde_json::to_value(&person).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("first_name").is_none());
    }
}

//! Operator code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OperatorCode`].
///
/// Each variant carries the exact message surfaced to API clients.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OperatorCodeError {
    /// The input string is empty (after trimming).
    #[error("Operator code is required")]
    Empty,
    /// The input is not exactly 11 characters long.
    #[error("Operator code must be 11 characters long")]
    WrongLength,
    /// The input does not match the `OP-XXXXXXXX` pattern.
    #[error("Invalid operator code format")]
    InvalidFormat,
}

/// A staff operator's login code.
///
/// ## Constraints
///
/// - Exactly 11 characters
/// - `OP-` prefix followed by 8 uppercase alphanumeric characters
///
/// Generated codes use only uppercase hex digits, but any uppercase
/// alphanumeric suffix parses; uniqueness is enforced by the database
/// constraint, not by this type.
///
/// ## Examples
///
/// ```
/// use sari_core::OperatorCode;
///
/// assert!(OperatorCode::parse("OP-AB12CD34").is_ok());
///
/// assert!(OperatorCode::parse("").is_err());            // empty
/// assert!(OperatorCode::parse("OP-AB12CD3").is_err());  // too short
/// assert!(OperatorCode::parse("OP-ab12cd34").is_err()); // lowercase suffix
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OperatorCode(String);

impl OperatorCode {
    /// Total length of an operator code.
    pub const LENGTH: usize = 11;

    /// Fixed prefix of every operator code.
    pub const PREFIX: &'static str = "OP-";

    /// Parse an `OperatorCode` from a string.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 11 characters
    /// - Does not match `OP-` followed by 8 uppercase alphanumerics
    pub fn parse(s: &str) -> Result<Self, OperatorCodeError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(OperatorCodeError::Empty);
        }

        if s.len() != Self::LENGTH {
            return Err(OperatorCodeError::WrongLength);
        }

        let suffix = s
            .strip_prefix(Self::PREFIX)
            .ok_or(OperatorCodeError::InvalidFormat)?;

        if !suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(OperatorCodeError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Generate a fresh operator code: `OP-` followed by 4 random bytes as
    /// uppercase hex.
    ///
    /// The RNG is cryptographically strong, but the code is not guaranteed
    /// globally unique; the storage layer's unique constraint is the final
    /// arbiter and creation fails on collision.
    #[must_use]
    pub fn generate() -> Self {
        let [a, b, c, d] = rand::random::<[u8; 4]>();
        Self(format!("{}{a:02X}{b:02X}{c:02X}{d:02X}", Self::PREFIX))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OperatorCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OperatorCode {
    type Err = OperatorCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OperatorCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OperatorCode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OperatorCode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OperatorCode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_codes() {
        assert!(OperatorCode::parse("OP-AB12CD34").is_ok());
        assert!(OperatorCode::parse("OP-00000000").is_ok());
        assert!(OperatorCode::parse("OP-ZZZZZZZZ").is_ok());
        assert!(OperatorCode::parse("OP-A1B2C3D4").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let code = OperatorCode::parse("  OP-AB12CD34  ").unwrap();
        assert_eq!(code.as_str(), "OP-AB12CD34");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(OperatorCode::parse(""), Err(OperatorCodeError::Empty));
        assert_eq!(OperatorCode::parse("   "), Err(OperatorCodeError::Empty));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            OperatorCode::parse("OP-AB12CD3"),
            Err(OperatorCodeError::WrongLength)
        );
        assert_eq!(
            OperatorCode::parse("OP-AB12CD345"),
            Err(OperatorCodeError::WrongLength)
        );
    }

    #[test]
    fn test_parse_bad_prefix() {
        assert_eq!(
            OperatorCode::parse("XX-AB12CD34"),
            Err(OperatorCodeError::InvalidFormat)
        );
        assert_eq!(
            OperatorCode::parse("op-AB12CD34"),
            Err(OperatorCodeError::InvalidFormat)
        );
    }

    #[test]
    fn test_parse_bad_suffix() {
        assert_eq!(
            OperatorCode::parse("OP-ab12cd34"),
            Err(OperatorCodeError::InvalidFormat)
        );
        assert_eq!(
            OperatorCode::parse("OP-AB12CD3!"),
            Err(OperatorCodeError::InvalidFormat)
        );
        assert_eq!(
            OperatorCode::parse("OP-AB12 D34"),
            Err(OperatorCodeError::InvalidFormat)
        );
    }

    #[test]
    fn test_generate_is_valid() {
        for _ in 0..32 {
            let code = OperatorCode::generate();
            assert!(OperatorCode::parse(code.as_str()).is_ok());
            assert_eq!(code.as_str().len(), OperatorCode::LENGTH);
            assert!(code.as_str().starts_with(OperatorCode::PREFIX));
            // Generated codes only use hex digits
            assert!(
                code.as_str()
                    .chars()
                    .skip(3)
                    .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let code = OperatorCode::parse("OP-AB12CD34").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"OP-AB12CD34\"");

        let parsed: OperatorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_display() {
        let code = OperatorCode::parse("OP-AB12CD34").unwrap();
        assert_eq!(format!("{code}"), "OP-AB12CD34");
    }
}

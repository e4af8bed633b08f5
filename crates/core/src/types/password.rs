//! Password strength validation.
//!
//! A [`Password`] holds a plaintext password that has passed the strength
//! rules. It exists only between request validation and hashing; it is never
//! stored, serialized, or logged.

use core::fmt;

/// Errors that can occur when validating a [`Password`].
///
/// Each variant carries the exact message surfaced to API clients.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The input string is empty (after trimming).
    #[error("Password is required")]
    Empty,
    /// The input is shorter than 8 characters.
    #[error("Password must be at least 8 characters long")]
    TooShort,
    /// The input is longer than 64 characters.
    #[error("Password must be at most 64 characters long")]
    TooLong,
    /// The input has no uppercase letter.
    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,
    /// The input has no lowercase letter.
    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,
    /// The input has no digit.
    #[error("Password must contain at least one number")]
    MissingDigit,
    /// The input has no symbol from the accepted set.
    #[error("Password must contain at least one special character")]
    MissingSymbol,
}

/// A plaintext password that satisfies the strength rules.
///
/// ## Constraints
///
/// - 8-64 characters after trimming
/// - At least one uppercase letter, one lowercase letter, one digit, and one
///   symbol from [`Password::SYMBOLS`]
///
/// Deliberately implements neither `Serialize` nor `Deserialize`, and its
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Minimum password length.
    pub const MIN_LENGTH: usize = 8;

    /// Maximum password length.
    pub const MAX_LENGTH: usize = 64;

    /// The accepted symbol set.
    pub const SYMBOLS: &'static str = "!@#$%^&*()_+={}[]:\";'<>?,./-";

    /// Validate a plaintext password against the strength rules.
    ///
    /// Leading and trailing whitespace is trimmed before validation. Rules
    /// are checked in order and the first violation wins, so callers always
    /// surface a single message.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a [`PasswordError`].
    pub fn parse(s: &str) -> Result<Self, PasswordError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PasswordError::Empty);
        }

        if s.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordError::TooShort);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(PasswordError::TooLong);
        }

        if !s.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordError::MissingUppercase);
        }

        if !s.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordError::MissingLowercase);
        }

        if !s.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordError::MissingDigit);
        }

        if !s.chars().any(|c| Self::SYMBOLS.contains(c)) {
            return Err(PasswordError::MissingSymbol);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the plaintext as a string slice (for hashing only).
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

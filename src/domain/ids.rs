//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers used throughout vitalis. Each type
//! ensures type safety so a user id can never be passed where a record id
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User identifier newtype wrapper
///
/// Identifies the owner of a vitals snapshot and history sequence.
/// The latest-vitals snapshot is keyed directly by this value.
///
/// # Examples
///
/// ```
/// use vitalis::domain::ids::UserId;
/// use std::str::FromStr;
///
/// let user_id = UserId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
/// assert_eq!(user_id.as_str(), "7d44b88c-4199-4bad-97dc-d78268e01398");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Record identifier newtype wrapper
///
/// Identifies a single history entry. Assigned by the store on creation;
/// latest-vitals snapshots reuse the owning user's id instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Record ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random record id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the record ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_creation() {
        let id = UserId::new("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
        assert_eq!(id.as_str(), "7d44b88c-4199-4bad-97dc-d78268e01398");
    }

    #[test]
    fn test_user_id_empty_fails() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn test_user_id_display() {
        let id = UserId::new("user-1").unwrap();
        assert_eq!(format!("{}", id), "user-1");
    }

    #[test]
    fn test_user_id_from_str() {
        let id: UserId = "user-abc".parse().unwrap();
        assert_eq!(id.as_str(), "user-abc");
    }

    #[test]
    fn test_record_id_generate_is_unique() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_record_id_empty_fails() {
        assert!(RecordId::new("").is_err());
    }

    #[test]
    fn test_record_id_serialization() {
        let id = RecordId::new("rec-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

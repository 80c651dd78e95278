//! Todo identifiers.
//!
//! # Design
//! Externally an id is the 24-character hex form of a MongoDB ObjectId;
//! internally it is the 12-byte `ObjectId` itself. Parsing only checks the
//! shape of the string. Whether a document with that id exists is a question
//! for the store.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Identifier of a single todo item.
///
/// Serializes transparently as an `ObjectId`, so it can be embedded directly
/// in BSON documents and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Generate a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Decode a hex identifier as received in a request path.
    ///
    /// Surrounding whitespace is ignored. Anything other than exactly 24 hex
    /// digits is rejected.
    pub fn parse(input: &str) -> Result<Self, TodoError> {
        let trimmed = input.trim();
        if trimmed.len() != 24 || !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TodoError::InvalidIdentifier(input.to_string()));
        }
        ObjectId::parse_str(trimmed)
            .map(Self)
            .map_err(|_| TodoError::InvalidIdentifier(input.to_string()))
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl FromStr for TodoId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn from_str_goes_through_parse() {
        let id: TodoId = " 507f1f77bcf86cd799439011 ".parse().unwrap();
        assert_eq!(id.to_hex(), "507f1f77bcf86cd799439011");
        assert_eq!(
            "nope".parse::<TodoId>(),
            Err(TodoError::InvalidIdentifier("nope".to_string()))
        );
    }

    #[test]
    fn parse_accepts_generated_hex() {
        let id = TodoId::generate();
        let parsed = TodoId::parse(&id.to_hex()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_trims_whitespace() {
        let parsed = TodoId::parse("  507f1f77bcf86cd799439011 ").unwrap();
        assert_eq!(parsed.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn parse_accepts_uppercase_hex() {
        let parsed = TodoId::parse("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(parsed.to_hex(), "507f1f77bcf86cd799439011");
    }

    #[rstest]
    #[case::empty("")]
    #[case::too_short("507f1f77bcf86cd79943901")]
    #[case::too_long("507f1f77bcf86cd7994390111")]
    #[case::not_hex("507f1f77bcf86cd79943901z")]
    #[case::uuid("00000000-0000-0000-0000-000000000000")]
    #[case::words("not-an-id")]
    fn parse_rejects_malformed(#[case] input: &str) {
        let err = TodoId::parse(input).unwrap_err();
        assert_eq!(err, TodoError::InvalidIdentifier(input.to_string()));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = TodoId::generate();
        let b = TodoId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let id = TodoId::parse("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn serializes_as_object_id_in_bson() {
        let id = TodoId::parse("507f1f77bcf86cd799439011").unwrap();
        let value = bson::to_bson(&id).unwrap();
        assert_eq!(value, bson::Bson::ObjectId(*id.as_object_id()));
    }
}

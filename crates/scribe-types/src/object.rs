use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a stored analysis.
///
/// Identifiers are minted by the result store at insertion time from a
/// random UUID v4 drawn from the OS CSPRNG. Callers never choose them; they
/// only hand back ids they were given. Any string may be wrapped for lookup,
/// which is how unknown ids reach the store and come back as not-found.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The empty id carried by a failed insertion.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Returns `true` if this is the empty id.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_id())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generate_produces_uuid_text() {
        let id = ObjectId::generate();
        assert_eq!(id.as_str().len(), 36);
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<ObjectId> = (0..1000).map(|_| ObjectId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn empty_id() {
        let id = ObjectId::empty();
        assert!(id.is_empty());
        assert_eq!(id.to_string(), "");
        assert!(!ObjectId::generate().is_empty());
    }

    #[test]
    fn short_id_is_8_chars() {
        let id = ObjectId::generate();
        assert_eq!(id.short_id().len(), 8);
        assert_eq!(ObjectId::from("abc").short_id(), "abc");
    }

    #[test]
    fn display_is_raw_string() {
        let id = ObjectId::from("nonexistent-id");
        assert_eq!(format!("{id}"), "nonexistent-id");
        assert_eq!(format!("{id:?}"), "ObjectId(nonexist)");
    }

    #[test]
    fn serde_is_transparent() {
        let id = ObjectId::from("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}

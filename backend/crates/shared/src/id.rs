//! Typed row identifiers
//!
//! Registrants and submissions are keyed by auto-incrementing integers
//! assigned by the store. The marker parameter keeps a registrant id from
//! being passed where a submission id is expected.

use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};

/// Store-assigned integer id tagged with the entity it belongs to
///
/// ```
/// use kernel::id::{Id, markers};
/// type RegistrantId = Id<markers::Registrant>;
/// let id = RegistrantId::from_i64(7);
/// assert_eq!(id.as_i64(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for contest registrants
    pub struct Registrant;

    /// Marker for uploaded submission files
    pub struct Submission;
}

pub type RegistrantId = Id<markers::Registrant>;
pub type SubmissionId = Id<markers::Submission>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_through_i64() {
        let id = RegistrantId::from_i64(42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_ids_order_by_value() {
        let older = SubmissionId::from(1);
        let newer = SubmissionId::from(2);
        assert!(older < newer);
        assert_ne!(older, newer);
    }

    #[test]
    fn test_id_serializes_as_number() {
        let id = RegistrantId::from_i64(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
    }
}

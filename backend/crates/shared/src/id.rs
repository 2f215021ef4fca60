//! Common ID Types
//!
//! Type-safe wrappers around the `BIGSERIAL` keys of users, posts,
//! comments and favorites.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type UserId = Id<markers::User>;
///
/// let id = UserId::new(7);
/// assert_eq!(id.get(), 7);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Wrap a raw database key
    pub const fn new(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Treat non-positive raw values as "no id".
    ///
    /// Keys start at 1, so `0` is the conventional "none" sentinel used by
    /// query strings and legacy clients.
    pub fn from_positive(value: i64) -> Option<Self> {
        (value > 0).then(|| Self::new(value))
    }

    /// Get the underlying integer
    pub const fn get(&self) -> i64 {
        self.value
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
        Self::new(value)
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

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct User;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Post;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Comment;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Favorite;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type PostId = Id<markers::Post>;
pub type CommentId = Id<markers::Comment>;
pub type FavoriteId = Id<markers::Favorite>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrips_raw_value() {
        let post_id = PostId::new(42);
        assert_eq!(post_id.get(), 42);
        assert_eq!(i64::from(post_id), 42);
        assert_eq!(post_id.to_string(), "42");
    }

    #[test]
    fn test_from_positive_treats_zero_as_none() {
        assert_eq!(UserId::from_positive(0), None);
        assert_eq!(UserId::from_positive(-3), None);
        assert_eq!(UserId::from_positive(5), Some(UserId::new(5)));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&CommentId::new(9)).unwrap();
        assert_eq!(json, "9");

        let id: FavoriteId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        let mut ids = vec![PostId::new(3), PostId::new(1), PostId::new(2)];
        ids.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, vec![PostId::new(3), PostId::new(2), PostId::new(1)]);
    }
}

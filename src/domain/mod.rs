//! Domain identifiers for users and posts.
//!
//! Newtype wrappers keep user and post ids from being mixed up once they leave
//! the persistence layer.

use serde::Deserialize;
use std::fmt;

/// Unique identifier for a [`User`](crate::db::User).
///
/// Deserializes from a bare integer, so it can be taken straight from a form
/// field or a path segment.
///
/// # Examples
///
/// ```rust
/// use bloggr::domain::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Unique identifier for a [`Post`](crate::db::Post).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct PostId(i32);

impl PostId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PostId> for i32 {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl From<i32> for PostId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

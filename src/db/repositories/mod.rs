pub mod post;
pub mod user;

use sea_orm::{DbErr, SqlErr};

/// Result of a batch insert where each record succeeds or fails on its own.
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    pub inserted: Vec<T>,
    pub rejected: Vec<Rejection>,
}

impl<T> Default for BatchOutcome<T> {
    fn default() -> Self {
        Self {
            inserted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> BatchOutcome<T> {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// A record from a batch that the database refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the record in the submitted batch.
    pub index: usize,
    /// Human readable label (username or post title) used in logs.
    pub label: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// A unique column (username, email) already holds this value.
    Duplicate,
    /// The referenced owner does not exist.
    UnknownOwner,
}

impl RejectReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::UnknownOwner => "unknown owner",
        }
    }
}

/// Maps integrity errors to a rejection reason. Anything else is not ours to swallow.
pub(crate) fn integrity_violation(err: &DbErr) -> Option<RejectReason> {
    match err.sql_err()? {
        SqlErr::UniqueConstraintViolation(_) => Some(RejectReason::Duplicate),
        SqlErr::ForeignKeyConstraintViolation(_) => Some(RejectReason::UnknownOwner),
        _ => None,
    }
}

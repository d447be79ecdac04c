//! Record identifiers.
//!
//! The dashboard uses human-readable identifiers: bare numbers for inventory
//! items, categories and warehouses (`"3"`), and prefixed numbers for the rest
//! (`"SH-1004"`, `"EQ-1002"`).

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of any record in the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier, rejecting empty or whitespace-only strings.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("identifier cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RecordId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Monotonic identifier generator for one collection.
///
/// Numbers are never reused, even after deletes: the next number is always
/// one past the highest number ever handed out (or seen at construction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    prefix: &'static str,
    next: u64,
}

impl IdSequence {
    pub fn new(prefix: &'static str, first: u64) -> Self {
        Self { prefix, next: first }
    }

    /// Start past every identifier in `existing` that carries this prefix.
    pub fn after<'a>(
        prefix: &'static str,
        first: u64,
        existing: impl IntoIterator<Item = &'a RecordId>,
    ) -> Self {
        let highest = existing
            .into_iter()
            .filter_map(|id| id.as_str().strip_prefix(prefix))
            .filter_map(|n| n.parse::<u64>().ok())
            .max();

        let next = match highest {
            Some(h) if h >= first => h + 1,
            _ => first,
        };
        Self { prefix, next }
    }

    pub fn next_id(&mut self) -> RecordId {
        let id = RecordId(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_rejects_blank() {
        assert_eq!(RecordId::parse("  SH-1001 ").unwrap().as_str(), "SH-1001");
        assert!(RecordId::parse("   ").is_err());
    }

    #[test]
    fn sequence_starts_past_seeded_ids() {
        let seeded: Vec<RecordId> = ["SH-1001", "SH-1005", "SH-1003"]
            .into_iter()
            .map(RecordId::from)
            .collect();
        let mut seq = IdSequence::after("SH-", 1001, &seeded);
        assert_eq!(seq.next_id(), "SH-1006");
        assert_eq!(seq.next_id(), "SH-1007");
    }

    #[test]
    fn sequence_ignores_foreign_prefixes() {
        let seeded: Vec<RecordId> = ["EQ-1009", "3"].into_iter().map(RecordId::from).collect();
        let mut seq = IdSequence::after("MT-", 1001, &seeded);
        assert_eq!(seq.next_id(), "MT-1001");
    }

    #[test]
    fn bare_numeric_sequence() {
        let seeded: Vec<RecordId> = ["1", "2", "5"].into_iter().map(RecordId::from).collect();
        let mut seq = IdSequence::after("", 1, &seeded);
        assert_eq!(seq.next_id(), "6");
        assert_eq!(seq.peek(), 7);
    }
}

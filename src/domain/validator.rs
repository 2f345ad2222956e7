//! Field-level validation accumulator.
//!
//! One `Validator` lives for the duration of a single request. Every rule is
//! checked, failures are collected per field, and the caller inspects
//! [`Validator::is_empty`] before doing any work.

use serde::Serialize;
use std::collections::BTreeMap;

/// Collects `field -> message` pairs. The first failure recorded for a field wins.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records `message` under `key` unless `key` already has one.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Records `message` under `key` when `acceptable` is false.
    pub fn check(&mut self, acceptable: bool, key: &str, message: &str) {
        if !acceptable {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Returns true when `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq + ?Sized>(value: &T, permitted: &[&T]) -> bool {
    permitted.iter().any(|p| *p == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_records_only_failures() {
        let mut v = Validator::new();
        v.check(true, "name", "this is required");
        assert!(v.is_empty());

        v.check(false, "name", "this is required");
        assert!(!v.is_empty());
        assert_eq!(v.errors().get("name").map(String::as_str), Some("this is required"));
    }

    #[test]
    fn first_failure_per_key_wins() {
        let mut v = Validator::new();
        v.check(false, "page", "must be a positive integer");
        v.check(false, "page", "must be a maximum of 10 million");
        v.check(false, "sort", "invalid sort value");

        let errors = v.into_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["page"], "must be a positive integer");
        assert_eq!(errors["sort"], "invalid sort value");
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut v = Validator::new();
        v.add_error("author", "must be provided");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({ "author": "must be provided" }));
    }

    #[test]
    fn permitted_value_matches_exact_entries() {
        let list = ["name", "-name"];
        assert!(permitted_value("-name", &list));
        assert!(!permitted_value("--name", &list));
        assert!(!permitted_value("NAME", &list));
    }
}

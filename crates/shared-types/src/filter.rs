use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::case::{CaseField, CaseRecord};

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Field filters. Setting an empty value removes the constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    values: BTreeMap<CaseField, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: CaseField, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn with(mut self, field: CaseField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: CaseField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.values.len()
    }

    /// Every non-empty filter must be a case-insensitive substring of the field.
    pub fn matches(&self, case: &CaseRecord) -> bool {
        self.values.iter().all(|(field, value)| {
            if value.is_empty() {
                return true;
            }
            match case.field_value(*field) {
                Some(actual) => contains_ci(&actual, &value.to_lowercase()),
                None => false,
            }
        })
    }
}

/// Free-text search across every field. An empty term matches everything.
pub fn matches_search(case: &CaseRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    CaseField::ALL
        .iter()
        .filter_map(|field| case.field_value(*field))
        .any(|value| contains_ci(&value, &needle))
}

/// Search term plus field filters, applied together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaseQuery {
    pub search: String,
    pub filters: FilterSet,
}

impl CaseQuery {
    pub fn matches(&self, case: &CaseRecord) -> bool {
        matches_search(case, &self.search) && self.filters.matches(case)
    }

    /// The matching cases in their original order.
    pub fn apply(&self, cases: &[CaseRecord]) -> Vec<CaseRecord> {
        cases.iter().filter(|c| self.matches(c)).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.filters.is_empty()
    }
}

/// Distinct non-empty values of `field`, first-seen order.
pub fn distinct_values(cases: &[CaseRecord], field: CaseField) -> Vec<String> {
    let mut seen = Vec::new();
    for value in cases.iter().filter_map(|c| c.field_value(field)) {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

//! Typed list filtering for the minors and staff lists.
//!
//! A [`ListFilter`] keeps the initial and current criteria side by side so
//! callers can reset and detect active filters without inspecting shapes at
//! runtime.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CaseCategory, MinorRecord, StaffMember};

/// Criteria that know which of their fields differ from a baseline.
pub trait FilterState: Clone {
    /// Whether any field differs from `initial` and is non-empty.
    fn is_active_relative_to(&self, initial: &Self) -> bool;
}

/// Initial and current criteria plus a typed predicate.
#[derive(Debug, Clone)]
pub struct ListFilter<F> {
    initial: F,
    current: F,
}

impl<F: FilterState> ListFilter<F> {
    pub fn new(initial: F) -> Self {
        Self {
            current: initial.clone(),
            initial,
        }
    }

    /// Start from `initial` with `current` already applied.
    pub const fn with_current(initial: F, current: F) -> Self {
        Self { initial, current }
    }

    pub const fn criteria(&self) -> &F {
        &self.current
    }

    /// Mutate the current criteria in place.
    pub fn update(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.current);
    }

    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }

    pub fn has_active_filters(&self) -> bool {
        self.current.is_active_relative_to(&self.initial)
    }

    /// Keep the items accepted by `predicate` under the current criteria.
    pub fn apply<'a, T>(
        &self,
        items: &'a [T],
        predicate: impl Fn(&T, &F) -> bool,
    ) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| predicate(item, &self.current))
            .collect()
    }
}

fn text_active(current: &str, initial: &str) -> bool {
    !current.trim().is_empty() && current != initial
}

fn option_active<T: PartialEq>(current: Option<&T>, initial: Option<&T>) -> bool {
    current.is_some() && current != initial
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Case-file status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    #[serde(rename = "complet")]
    Complete,
    #[serde(rename = "incomplet")]
    Incomplete,
}

/// Criteria for the minors list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinorListFilter {
    pub search: String,
    pub category: Option<CaseCategory>,
    pub entry_date: Option<NaiveDate>,
    pub status: Option<CaseStatus>,
}

impl FilterState for MinorListFilter {
    fn is_active_relative_to(&self, initial: &Self) -> bool {
        text_active(&self.search, &initial.search)
            || option_active(self.category.as_ref(), initial.category.as_ref())
            || option_active(self.entry_date.as_ref(), initial.entry_date.as_ref())
            || option_active(self.status.as_ref(), initial.status.as_ref())
    }
}

impl MinorListFilter {
    /// Predicate over a minor record.
    #[must_use]
    pub fn matches(minor: &MinorRecord, criteria: &Self) -> bool {
        let full_name = format!("{} {}", minor.first_name, minor.last_name);
        let search_ok =
            criteria.search.trim().is_empty() || contains_folded(&full_name, &criteria.search);
        let category_ok = criteria
            .category
            .as_ref()
            .is_none_or(|category| minor.categories.contains(category));
        let entry_ok = criteria
            .entry_date
            .is_none_or(|day| minor.created_at.date_naive() == day);
        let status_ok = criteria.status.is_none_or(|status| match status {
            CaseStatus::Complete => minor.case_complete,
            CaseStatus::Incomplete => !minor.case_complete,
        });
        search_ok && category_ok && entry_ok && status_ok
    }
}

/// Criteria for the staff list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffListFilter {
    pub search: String,
}

impl FilterState for StaffListFilter {
    fn is_active_relative_to(&self, initial: &Self) -> bool {
        text_active(&self.search, &initial.search)
    }
}

impl StaffListFilter {
    /// Predicate over a staff record: search in last name, first name, email.
    #[must_use]
    pub fn matches(member: &StaffMember, criteria: &Self) -> bool {
        let needle = criteria.search.trim();
        needle.is_empty()
            || contains_folded(&member.last_name, needle)
            || contains_folded(&member.first_name, needle)
            || contains_folded(&member.email, needle)
    }
}

#[cfg(test)]
#[path = "list_filter_tests.rs"]
mod tests;

//! PostgREST query construction.

use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::HeaderMap;

use crate::domain::ScopeFilter;
use crate::domain::ports::Collection;

/// Filters, ordering and projection for one `/rest/v1/{table}` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestQuery {
    collection: Collection,
    params: Vec<(String, String)>,
}

impl RestQuery {
    pub const fn from(collection: Collection) -> Self {
        Self {
            collection,
            params: Vec::new(),
        }
    }

    pub fn select(self, columns: &str) -> Self {
        self.param("select", columns)
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.param(column, format!("eq.{value}"))
    }

    pub fn gte(self, column: &str, at: DateTime<Utc>) -> Self {
        self.param(column, format!("gte.{}", timestamp(at)))
    }

    pub fn lte(self, column: &str, at: DateTime<Utc>) -> Self {
        self.param(column, format!("lte.{}", timestamp(at)))
    }

    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.param("order", format!("{column}.{direction}"))
    }

    /// Restrict to the scope's structure unless it is unrestricted.
    pub fn scoped(self, scope: &ScopeFilter) -> Self {
        match scope.restriction() {
            Some(structure) => self.eq("structure_id", structure),
            None => self,
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    pub fn path(&self) -> String {
        format!("rest/v1/{}", self.collection.table())
    }

    pub const fn collection(&self) -> Collection {
        self.collection
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/42`.
pub fn content_range_total(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-range")?
        .to_str()
        .ok()?
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
}
